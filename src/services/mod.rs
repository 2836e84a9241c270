/*
 * Responsibility
 * - ドメイン側のサービス (HTTP 非依存)
 */
pub mod auth;
