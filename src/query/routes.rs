/// Prefix shared by every data route.
pub const API_PREFIX: &str = "/api/v1.0";

/// The route templates the service answers, in the order they are advertised.
///
/// # Examples
///
/// ```
/// let routes = surfs_up::list_routes();
/// assert_eq!(routes[0], "/api/v1.0/precipitation");
/// assert_eq!(routes.len(), 5);
/// ```
pub fn list_routes() -> Vec<String> {
    ["precipitation", "stations", "tobs", "<start>", "<start>/<end>"]
        .iter()
        .map(|segment| format!("{}/{}", API_PREFIX, segment))
        .collect()
}
