pub const DEFINITIONS_PATH: &str = "/definitions";

/// `/definitions` or `/definitions/{vhost}` with the vhost encoded as a single
/// segment, so `/` and `my/vhost` become `%2F` and `my%2Fvhost`.
pub fn definitions_path(vhost: Option<&str>) -> String {
    match vhost {
        Some(vhost) => format!("{DEFINITIONS_PATH}/{}", encode_path_segment(vhost)),
        None => DEFINITIONS_PATH.to_string(),
    }
}

pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
#[path = "path_test.rs"]
mod tests;
