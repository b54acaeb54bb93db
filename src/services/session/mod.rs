/*
 * Responsibility
 * - guard から見える session store の契約 (SessionStore)
 * - リクエスト毎の明示的なコンテキスト (SessionContext)
 * - login user の取得元 (LoginUserSource) と プロセス内キャッシュ (SessionRegistry)
 */
pub mod context;
pub mod registry;
pub mod source;
pub mod store;

pub use context::SessionContext;
pub use registry::SessionRegistry;
pub use source::{CacheLoginUserSource, LoginUserSource};
pub use store::SessionStore;
