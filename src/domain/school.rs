use crate::domain::GeoPoint;
use serde::Deserialize;

/// A school a service provider can check in or out of. The `id` is the value
/// encoded in the QR code posted at the school's entrance.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct School {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
}

/// The set of known schools, resolved once at startup.
#[derive(Debug)]
pub struct SchoolDirectory {
    schools: Vec<School>,
}

impl SchoolDirectory {
    pub fn new(schools: Vec<School>) -> Self {
        SchoolDirectory { schools }
    }

    pub fn find(&self, id: &str) -> Option<&School> {
        self.schools.iter().find(|school| school.id == id)
    }

    pub fn schools(&self) -> &[School] {
        &self.schools
    }
}
