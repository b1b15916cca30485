pub fn parse_peer_id(value: &str) -> Result<i64, String> {
    let trimmed = value.trim();
    let id: i64 = trimmed
        .parse()
        .map_err(|_| format!("invalid peer id '{}'", trimmed))?;
    if id <= 0 {
        return Err("peer id must be greater than zero".into());
    }
    Ok(id)
}

pub fn parse_peer_name(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("peer name cannot be empty".into());
    }
    if trimmed.len() > 64 {
        return Err("peer name must be 64 characters or fewer".into());
    }
    if trimmed.contains(['\n', '\r']) {
        return Err("peer name cannot include newlines".into());
    }
    Ok(trimmed.to_string())
}

pub fn parse_keepalive(value: &str) -> Result<u32, String> {
    let trimmed = value.trim();
    let secs: u32 = trimmed
        .parse()
        .map_err(|_| format!("invalid keepalive '{}'", trimmed))?;
    if secs == 0 {
        return Err("keepalive must be greater than zero".into());
    }
    Ok(secs)
}
