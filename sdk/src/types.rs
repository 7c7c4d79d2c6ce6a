//! Wire types shared with the service.

use serde::{Deserialize, Serialize};

/// A virtual machine record as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    /// Server-assigned identifier, positive once persisted.
    pub id: i64,
    pub name: String,
    pub instance_type: String,
}

/// Fields a caller supplies when creating or updating a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVirtualMachine {
    pub name: String,
    pub instance_type: String,
}

impl NewVirtualMachine {
    pub fn new(name: impl Into<String>, instance_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance_type: instance_type.into(),
        }
    }
}

impl From<VirtualMachine> for NewVirtualMachine {
    fn from(vm: VirtualMachine) -> Self {
        Self {
            name: vm.name,
            instance_type: vm.instance_type,
        }
    }
}
