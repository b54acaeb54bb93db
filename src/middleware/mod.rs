/*
 * Responsibility
 * - middleware の公開インターフェース
 * - guard::apply (ページ遷移のアクセス判定), http::apply, cors::apply
 */
pub mod cors;
pub mod guard;
pub mod http;
