mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod patient_dashboard;
pub use patient_dashboard::PatientDashboard;

mod hospital_dashboard;
pub use hospital_dashboard::HospitalDashboard;
