#[allow(dead_code)]
pub mod socket_guard;
#[allow(dead_code)]
pub mod truncated_body;
