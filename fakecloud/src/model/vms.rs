use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct VirtualMachine {
    pub id: i64,
    pub name: String,
    pub instance_type: String,
}

#[derive(sqlx::FromRow)]
pub struct VirtualMachineRow {
    pub id: i64,
    pub name: String,
    pub instance_type: String,
}

impl From<VirtualMachineRow> for VirtualMachine {
    fn from(row: VirtualMachineRow) -> Self {
        VirtualMachine {
            id: row.id,
            name: row.name,
            instance_type: row.instance_type,
        }
    }
}

/// Request body for create and update. An `id` sent by the client is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct NewVirtualMachine {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "instance_type must not be empty"))]
    pub instance_type: String,
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<VirtualMachine>, sqlx::Error> {
    let vms: Vec<VirtualMachineRow> = sqlx::query_as(
        r#"
SELECT id, name, instance_type
FROM virtual_machines
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(vms.into_iter().map(VirtualMachine::from).collect())
}

pub async fn get(pool: &SqlitePool, vm_id: i64) -> Result<VirtualMachine, sqlx::Error> {
    let vm: VirtualMachineRow = sqlx::query_as(
        r#"
SELECT id, name, instance_type
FROM virtual_machines
WHERE id = ?
        "#,
    )
    .bind(vm_id)
    .fetch_one(pool)
    .await?;

    Ok(vm.into())
}

// create inserts a new row and returns it together with its assigned id
pub async fn create(pool: &SqlitePool, vm: &NewVirtualMachine) -> Result<VirtualMachine, sqlx::Error> {
    let row: VirtualMachineRow = sqlx::query_as(
        r#"
INSERT INTO virtual_machines (name, instance_type)
VALUES (?, ?)
RETURNING id, name, instance_type
        "#,
    )
    .bind(&vm.name)
    .bind(&vm.instance_type)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Error creating virtual machine: {}", e);
        e
    })?;

    Ok(row.into())
}

/// Overwrite name and instance type of `vm_id`.
///
/// The row is not checked for existence first: updating an unknown id affects
/// nothing and still succeeds. Returns the number of rows affected.
pub async fn update(
    pool: &SqlitePool,
    vm_id: i64,
    vm: &NewVirtualMachine,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE virtual_machines SET name = ?, instance_type = ? WHERE id = ?")
        .bind(&vm.name)
        .bind(&vm.instance_type)
        .bind(vm_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &SqlitePool, vm_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM virtual_machines WHERE id = ?")
        .bind(vm_id)
        .execute(pool)
        .await?;
    Ok(())
}
