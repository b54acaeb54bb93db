/*!
 * Navigation guard
 *
 * Responsibility:
 * - 遷移先ルートの要求アクセスレベルとユーザーの role を比較し、
 *   Proceed / login へリダイレクト / noAuth へリダイレクト のいずれかを返す
 * - リダイレクトの実行 (副作用) は router 側 (middleware) の責務
 *
 * Public API:
 * - guard
 * - Destination, RouteMeta, Navigation, GuardPaths
 */

mod core;
mod types;

pub use self::core::guard;
pub use types::{Destination, GuardPaths, Navigation, RouteMeta};
