/*!
 * Access control primitives
 *
 * Public API:
 * - AccessLevel
 * - LoginUser
 * - check_access
 */

mod check;
mod identity;
mod level;

pub use check::check_access;
pub use identity::LoginUser;
pub use level::{AccessLevel, UnknownAccessLevel};
