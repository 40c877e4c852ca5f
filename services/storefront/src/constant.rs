pub mod hard_limit {
    pub const MAX_SECONDS_REQUEST_TIMEOUT: u16 = 300u16;
    pub const MAX_NUM_REDIRECTS: u8 = 8u8;
    // number of bytes kept from error response body in the error detail
    pub const MAX_NBYTES_ERROR_DETAIL: usize = 256usize;
}

pub mod session_keys {
    pub const TOKEN: &str = "token";
    pub const ROLE: &str = "role";
}

pub mod roles {
    pub const MANAGER: &str = "MANAGER";
    pub const USER: &str = "USER";
}

pub const HTTP_CONTENT_TYPE_JSON: &str = "application/json";
pub const HTTP_CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
