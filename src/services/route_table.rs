/*
 * Responsibility
 * - パス → RouteMeta (アクセスレベル) の対応表
 * - 設定文字列 ("/admin=admin,/question/{id}=user") からの構築
 *
 * Pattern
 * - `/` 区切りのセグメント
 * - `{name}` は任意の 1 セグメントにマッチ
 * - 末尾の `*` は残り全てにマッチ
 * - 先に定義したものが優先。どれにもマッチしなければ RouteMeta::default() (ログイン不要)
 */
use thiserror::Error;

use crate::access::{AccessLevel, UnknownAccessLevel};
use crate::guard::RouteMeta;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route entry must look like `/path=level`: {0}")]
    MalformedEntry(String),
    #[error("route pattern must start with '/': {0}")]
    InvalidPattern(String),
    #[error("route {pattern}: {source}")]
    UnknownLevel {
        pattern: String,
        source: UnknownAccessLevel,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
    Rest,
}

#[derive(Debug, Clone)]
struct RouteDef {
    segments: Vec<Segment>,
    meta: RouteMeta,
}

impl RouteDef {
    fn matches(&self, path: &str) -> bool {
        let mut parts = split(path);

        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Param => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(lit) => {
                    if parts.next() != Some(lit.as_str()) {
                        return false;
                    }
                }
            }
        }

        parts.next().is_none()
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, pattern: &str, meta: RouteMeta) -> Result<Self, RouteTableError> {
        if !pattern.starts_with('/') {
            return Err(RouteTableError::InvalidPattern(pattern.to_string()));
        }

        let segments = split(pattern)
            .map(|s| match s {
                "*" => Segment::Rest,
                s if s.starts_with('{') && s.ends_with('}') => Segment::Param,
                s => Segment::Literal(s.to_string()),
            })
            .collect::<Vec<_>>();

        if segments[..segments.len().saturating_sub(1)].contains(&Segment::Rest) {
            return Err(RouteTableError::InvalidPattern(pattern.to_string()));
        }

        self.routes.push(RouteDef { segments, meta });
        Ok(self)
    }

    /// Parse `"/admin=admin, /question/{id}=user"`. Blank entries are skipped.
    pub fn parse(entries: &str) -> Result<Self, RouteTableError> {
        entries.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .try_fold(Self::new(), |table, entry| {
                let (pattern, level) = entry
                    .split_once('=')
                    .ok_or_else(|| RouteTableError::MalformedEntry(entry.to_string()))?;
                let pattern = pattern.trim();

                let level = level.trim().parse::<AccessLevel>().map_err(|source| {
                    RouteTableError::UnknownLevel {
                        pattern: pattern.to_string(),
                        source,
                    }
                })?;

                table.route(pattern, RouteMeta::requiring(level))
            })
    }

    /// Metadata of the first route matching `path` (query string excluded).
    pub fn resolve(&self, path: &str) -> RouteMeta {
        self.routes
            .iter()
            .find(|r| r.matches(path))
            .map(|r| r.meta)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_literal_param_and_wildcard_routes() {
        let table = RouteTable::parse(
            "/admin=admin, /question/update/{id}=user, /manage/*=admin, /=notLogin",
        )
        .unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.resolve("/admin").access, Some(AccessLevel::Admin));
        assert_eq!(table.resolve("/admin/").access, Some(AccessLevel::Admin));
        assert_eq!(
            table.resolve("/question/update/42").access,
            Some(AccessLevel::User)
        );
        assert_eq!(table.resolve("/question/update").access, None);
        assert_eq!(table.resolve("/manage/a/b/c").access, Some(AccessLevel::Admin));
        assert_eq!(table.resolve("/").access, Some(AccessLevel::NotLogin));
    }

    #[test]
    fn unknown_paths_need_no_login() {
        let table = RouteTable::parse("/admin=admin").unwrap();
        assert_eq!(table.resolve("/home"), RouteMeta::default());
        assert_eq!(table.resolve("/admin/users"), RouteMeta::default());
    }

    #[test]
    fn first_match_wins() {
        let table = RouteTable::new()
            .route("/question/add", RouteMeta::requiring(AccessLevel::Admin))
            .unwrap()
            .route("/question/{id}", RouteMeta::requiring(AccessLevel::User))
            .unwrap();

        assert_eq!(table.resolve("/question/add").access, Some(AccessLevel::Admin));
        assert_eq!(table.resolve("/question/7").access, Some(AccessLevel::User));
    }

    #[test]
    fn rejects_bad_entries() {
        assert_eq!(
            RouteTable::parse("/admin").unwrap_err(),
            RouteTableError::MalformedEntry("/admin".to_string())
        );
        assert_eq!(
            RouteTable::parse("admin=admin").unwrap_err(),
            RouteTableError::InvalidPattern("admin".to_string())
        );
        assert!(matches!(
            RouteTable::parse("/admin=root").unwrap_err(),
            RouteTableError::UnknownLevel { .. }
        ));
        assert!(matches!(
            RouteTable::parse("/a/*/b=user").unwrap_err(),
            RouteTableError::InvalidPattern(_)
        ));
        assert_eq!(RouteTable::parse(" , ").unwrap().len(), 0);
    }
}
