//! Self-description an app declares to its host.

use std::fmt;
use std::path::{Path, PathBuf};

use protogen_core::attributes::keys;
use protogen_core::{AccessLevel, AttributeStore};
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoints;
use crate::error::{AppError, AppResult};

/// Validated app identifier: non-empty, lowercase alphanumerics and hyphens,
/// not starting or ending with a hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AppId(String);

impl<'de> Deserialize<'de> for AppId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl AppId {
    /// Validate and wrap an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidManifest`] if `id` is empty, contains
    /// anything other than lowercase ASCII alphanumerics and hyphens, or
    /// starts or ends with a hyphen.
    pub fn new(id: impl Into<String>) -> AppResult<Self> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> AppResult<()> {
        if id.is_empty() {
            return Err(AppError::InvalidManifest("app id must not be empty".into()));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(AppError::InvalidManifest(format!(
                "app id must contain only lowercase alphanumeric characters and hyphens, got: {id}"
            )));
        }
        if id.starts_with('-') || id.ends_with('-') {
            return Err(AppError::InvalidManifest(format!(
                "app id must not start or end with a hyphen, got: {id}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Everything an app declares about itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppManifest {
    /// Build identifier.
    pub id: AppId,
    /// Human-readable name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// URL path of the thumbnail image.
    pub thumbnail: String,
    /// URL path of the main web page.
    pub main_page: String,
    /// URL of the home/info page.
    pub home_page: String,
    /// URL root the static files are served under.
    pub static_files_path: String,
    /// Directory, relative to the resources directory, holding static files.
    pub static_files_directory: String,
    /// Frames per second the host should render at.
    pub framerate: f32,
}

impl AppManifest {
    /// A manifest with the conventional page layout and 30 fps.
    #[must_use]
    pub fn new(id: AppId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            thumbnail: "/static/thumbnail.png".to_owned(),
            main_page: "/static/index.html".to_owned(),
            home_page: "/home".to_owned(),
            static_files_path: "/static".to_owned(),
            static_files_directory: "static".to_owned(),
            framerate: 30.0,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the framerate.
    #[must_use]
    pub fn with_framerate(mut self, framerate: f32) -> Self {
        self.framerate = framerate;
        self
    }

    /// Check the declared values.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidManifest`] for a non-positive or non-finite
    /// framerate, a URL path not starting with `/`, or a static files path
    /// that cannot be mounted (`/`, a trailing slash, empty or parameter
    /// segments).
    pub fn validate(&self) -> AppResult<()> {
        if !self.framerate.is_finite() || self.framerate <= 0.0 {
            return Err(AppError::InvalidManifest(format!(
                "framerate must be a finite positive number, got {}",
                self.framerate
            )));
        }
        for (field, value) in [
            ("thumbnail", &self.thumbnail),
            ("main_page", &self.main_page),
            ("home_page", &self.home_page),
            ("static_files_path", &self.static_files_path),
        ] {
            if !value.starts_with('/') {
                return Err(AppError::InvalidManifest(format!(
                    "{field} must start with '/', got: {value}"
                )));
            }
        }
        validate_mount_path(&self.static_files_path)
    }

    /// Check that the static mount does not overlap any of `endpoints`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidManifest`] if an endpoint path equals the
    /// static files path or lies beneath it.
    pub fn check_static_mount(&self, endpoints: &Endpoints) -> AppResult<()> {
        let mount = &self.static_files_path;
        match endpoints
            .as_slice()
            .iter()
            .find(|e| mount_covers(mount, &e.path))
        {
            Some(endpoint) => Err(AppError::InvalidManifest(format!(
                "static_files_path {mount} overlaps endpoint {} {}",
                endpoint.method, endpoint.path
            ))),
            None => Ok(()),
        }
    }

    /// Publish the identity attributes, read-only.
    pub fn publish(&self, store: &AttributeStore) {
        for (key, value) in [
            (keys::ID, self.id.as_str()),
            (keys::NAME, self.name.as_str()),
            (keys::DESCRIPTION, self.description.as_str()),
            (keys::THUMBNAIL, self.thumbnail.as_str()),
            (keys::MAIN_PAGE, self.main_page.as_str()),
            (keys::HOME_PAGE, self.home_page.as_str()),
        ] {
            store.admin_set(key, value, AccessLevel::Read);
        }
    }

    /// Location of the static files inside `resources`.
    #[must_use]
    pub fn static_dir(&self, resources: &Path) -> PathBuf {
        resources.join(&self.static_files_directory)
    }
}

fn validate_mount_path(path: &str) -> AppResult<()> {
    let bad = |reason: &str| {
        Err(AppError::InvalidManifest(format!(
            "static_files_path {reason}, got: {path}"
        )))
    };
    if path == "/" {
        return bad("must not be the root");
    }
    if path.ends_with('/') {
        return bad("must not end with '/'");
    }
    let mut segments = path.split('/').skip(1);
    if segments.any(|s| s.is_empty() || s.starts_with(':') || s.starts_with('*')) {
        return bad("must consist of non-empty literal segments");
    }
    Ok(())
}

/// Whether serving everything under `mount` would capture `route`.
///
/// Route parameter segments (`:id`, `*rest`) match any mount segment.
fn mount_covers(mount: &str, route: &str) -> bool {
    let mut route_segments = route.split('/').filter(|s| !s.is_empty());
    mount.split('/').filter(|s| !s.is_empty()).all(|m| {
        route_segments
            .next()
            .is_some_and(|r| r == m || r.starts_with(':') || r.starts_with('*'))
    })
}

#[cfg(test)]
mod tests {
    use crate::endpoint::{Endpoint, EndpointRequest, EndpointResponse, HttpMethod};

    use super::*;

    #[test]
    fn test_app_id_validation() {
        assert!(AppId::new("protogen-face").is_ok());
        assert!(AppId::new("").is_err());
        assert!(AppId::new("Protogen").is_err());
        assert!(AppId::new("a b").is_err());
        assert!(AppId::new("-face").is_err());
        assert!(AppId::new("face-").is_err());
    }

    #[test]
    fn test_app_id_deserialize_validates() {
        let ok: AppId = serde_json::from_str("\"face-2\"").unwrap();
        assert_eq!(ok.as_str(), "face-2");
        assert!(serde_json::from_str::<AppId>("\"Bad_Id\"").is_err());
    }

    #[test]
    fn test_publish_sets_read_only_identity() {
        let manifest = AppManifest::new(AppId::new("protogen-face").unwrap(), "Protogen Face")
            .with_description("test face");
        let store = AttributeStore::new();
        manifest.publish(&store);

        assert_eq!(store.len(), 6);
        assert_eq!(store.get(keys::ID).unwrap(), "protogen-face");
        assert_eq!(store.get(keys::THUMBNAIL).unwrap(), "/static/thumbnail.png");
        assert_eq!(store.access(keys::NAME), Some(AccessLevel::Read));
        assert!(store.set(keys::NAME, "renamed").is_err());
    }

    #[test]
    fn test_manifest_validation() {
        let manifest = AppManifest::new(AppId::new("a").unwrap(), "A");
        manifest.validate().unwrap();

        let bad = manifest.clone().with_framerate(0.0);
        assert!(bad.validate().is_err());

        let mut bad = manifest;
        bad.home_page = "home".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_static_path_must_be_mountable() {
        let manifest = AppManifest::new(AppId::new("a").unwrap(), "A");
        for bad in ["/", "/static/", "/static//files", "/files/:id", "/*rest"] {
            let mut m = manifest.clone();
            m.static_files_path = bad.into();
            assert!(m.validate().is_err(), "{bad} accepted");
        }
        let mut m = manifest;
        m.static_files_path = "/assets/v1".into();
        m.validate().unwrap();
    }

    fn ok(_: &EndpointRequest) -> EndpointResponse {
        EndpointResponse::status(200)
    }

    fn routes() -> Endpoints {
        Endpoints::new()
            .with(Endpoint::new(HttpMethod::Get, "/home", ok))
            .with(Endpoint::new(HttpMethod::Get, "/hello", ok))
            .with(Endpoint::new(HttpMethod::Get, "/hello/website", ok))
            .with(Endpoint::new(HttpMethod::Get, "/attributes", ok))
            .with(Endpoint::new(HttpMethod::Put, "/attributes/:id", ok))
    }

    #[test]
    fn test_static_mount_must_not_overlap_routes() {
        let mut manifest = AppManifest::new(AppId::new("a").unwrap(), "A");
        manifest.check_static_mount(&routes()).unwrap();

        for bad in ["/home", "/hello", "/hello/website", "/attributes", "/attributes/name"] {
            manifest.static_files_path = bad.into();
            let err = manifest.check_static_mount(&routes()).unwrap_err();
            assert!(matches!(err, AppError::InvalidManifest(_)), "{bad}");
        }

        for fine in ["/home/assets", "/hello-files", "/static"] {
            manifest.static_files_path = fine.into();
            manifest.check_static_mount(&routes()).unwrap();
        }
    }

    #[test]
    fn test_static_dir() {
        let manifest = AppManifest::new(AppId::new("a").unwrap(), "A");
        assert_eq!(
            manifest.static_dir(Path::new("/res")),
            PathBuf::from("/res/static")
        );
    }
}
