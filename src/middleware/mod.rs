pub mod patient_form;
pub mod patient_id;

pub use patient_form::PatientForm;
pub use patient_id::PatientId;
