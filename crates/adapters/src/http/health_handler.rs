/// Liveness probe: always 200 `Ok!` while the process is serving.
///
/// Not rate limited and never touches the dispatch channel.
pub async fn healthz() -> &'static str {
    "Ok!"
}
