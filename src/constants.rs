pub(crate) const AUTH_PATH_PREFIX: &str = "/auth/";

pub(crate) const AUTH_LOGIN_PATH: &str = "/auth/login";
pub(crate) const AUTH_REGISTER_PATH: &str = "/auth/register";
pub(crate) const AUTH_ME_PATH: &str = "/auth/me";
pub(crate) const AUTH_REFRESH_PATH: &str = "/auth/refresh";

pub(crate) const DEFAULT_HTTP_TIMEOUT: u64 = 30;

pub(crate) const FALLBACK_ERROR_MESSAGE: &str = "request failed";
