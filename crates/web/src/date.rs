//! Timestamps for log entries, in the RFC 7231 `Date` header format.

pub(crate) fn now() -> String {
    let mut buf = faf_http_date::get_date_buff_no_key();
    faf_http_date::get_date_no_key(&mut buf);
    String::from_utf8_lossy(&buf[..]).into_owned()
}
