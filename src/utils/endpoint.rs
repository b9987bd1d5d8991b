use url::Url;

/// Resolves `path` under `base`, treating the base as a directory.
///
/// `Url::join` replaces the last segment of a base without a trailing slash, so
/// `https://api.openai.com/v1` would otherwise resolve to `/chat/completions`.
pub fn join_endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(path.trim_start_matches('/'))
}
