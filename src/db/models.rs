use serde::Serialize;

/// A stored patient. Every field is populated; see `PatientsStorage::list`.
/// Serialized into the `patients.html` template context.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub national_id: String,
    pub age: i64,
    pub sex: String,
    pub smokes: String,
    pub drinks_alcohol: String,
}

/// A validated registration, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub national_id: String,
    pub age: i64,
    pub sex: String,
    pub smokes: String,
    pub drinks_alcohol: String,
}

impl Patient {
    pub fn from_new(id: i64, p: NewPatient) -> Self {
        Self {
            id,
            name: p.name,
            national_id: p.national_id,
            age: p.age,
            sex: p.sex,
            smokes: p.smokes,
            drinks_alcohol: p.drinks_alcohol,
        }
    }
}
