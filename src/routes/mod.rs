/// Router Module Index
///
/// Organizes the application's routing into role-segregated modules, so
/// access control is applied explicitly at the module level (via Axum
/// layers) and inside the handlers.
///
/// The modules map directly to the defined access roles.
// Routes accessible without a token: health check and the login/registration
// surface under /api/auth.
pub mod public;

// Routes restricted to the 'ADMIN' role: lecturer/student management and
// subject assignment, nested under /api/admin.
pub mod admin;

// Subject catalogue under /api/subjects: reads for every role, mutations
// for admins only. Role checks live in the handlers.
pub mod subjects;

// The lecturer's own views under /api/lecturer.
pub mod lecturer;

// The student's own views under /api/student.
pub mod student;
