//! Form domain layer
//!
//! Type-safe form handling for the auth, project, and estimation
//! create/edit views.

mod field;
mod form_state;

pub use field::{FieldValue, FormField};
pub use form_state::{
    EstimationFocus, EstimationForm, ForgotPasswordForm, Form, FormState, ItemColumn, ItemEdit,
    LoginForm, ProjectForm, RegisterForm, SectionEdit,
};
