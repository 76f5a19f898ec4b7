//! Client-side session models.
//!
//! Wire types live in `void_core`; these are the types that only exist on the
//! client: the auth state machine and the session it carries.

pub mod session;

pub use session::{AuthSession, AuthState, AuthStatus, Credentials};
