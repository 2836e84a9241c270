/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth: gateway の authentication / authorization フック
 * - http: request id, body limit, timeout, access log
 */
pub mod auth;
pub mod http;
