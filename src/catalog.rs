use serde::{Deserialize, Serialize};

use crate::transfer::TransferItem;

/// A door reader position managed by a controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub controller_id: Option<String>,
    #[serde(default)]
    pub area_id: Option<String>,
}

impl Door {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            location: String::new(),
            controller_id: None,
            area_id: None,
        }
    }
}

/// An elevator-served floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub level: i32,
}

impl Floor {
    pub fn new(id: &str, name: &str, level: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            building: String::new(),
            level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controller {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// A card holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub card_number: Option<String>,
}

impl User {
    pub fn new(id: &str, name: &str, department: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            email: String::new(),
            card_number: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// An alarm input watched by the monitoring screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringPoint {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
}

macro_rules! impl_transfer_item {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TransferItem for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

impl_transfer_item!(Door, Floor, Controller, Area, User, Department, AccessGroup, MonitoringPoint);

/// Everything an operator can pick from on the assignment screens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub controllers: Vec<Controller>,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub access_groups: Vec<AccessGroup>,
    #[serde(default)]
    pub monitoring_points: Vec<MonitoringPoint>,
}

impl Catalog {
    pub fn door(&self, id: &str) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == id)
    }

    pub fn floor(&self, id: &str) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}
