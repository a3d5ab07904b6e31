use error_stack::{Report, Result};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

use super::{Auth, Database, Limits, Logging, Media, ParseError};
use crate::util::figment::FigmentErrorAttachable;

#[derive(Debug, Deserialize)]
pub struct Server {
    /// **Environment variables**:
    /// - `CHIRPER_IP`
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    /// **Environment variables**:
    /// - `CHIRPER_PORT`
    #[serde(default = "Server::default_port")]
    pub port: u16,
    /// Amount of worker threads the async runtime will spawn.
    /// Defaults to the amount of available CPUs.
    ///
    /// **Environment variables**:
    /// - `CHIRPER_WORKERS`
    #[serde(default = "Server::default_workers")]
    pub workers: usize,

    pub auth: Auth,
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub media: Media,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub logging: Logging,
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ParseError> {
        let secret_len = self.auth.jwt_secret.len();
        if !(Auth::JWT_SECRET_MIN..=Auth::JWT_SECRET_MAX).contains(&secret_len) {
            return Err(Report::new(ParseError).attach_printable(format!(
                "auth.jwt_secret must have {} to {} characters",
                Auth::JWT_SECRET_MIN,
                Auth::JWT_SECRET_MAX
            )));
        }

        if self.auth.token_lifetime_secs == 0 {
            return Err(Report::new(ParseError)
                .attach_printable("auth.token_lifetime_secs must not be zero"));
        }

        if self.workers == 0 {
            return Err(Report::new(ParseError).attach_printable("workers must not be zero"));
        }

        if self.media.max_size == 0 {
            return Err(Report::new(ParseError).attach_printable("media.max_size must not be zero"));
        }

        if self.limits.post_max_characters == 0 || self.limits.comment_max_characters == 0 {
            return Err(Report::new(ParseError)
                .attach_printable("content limits in [limits] must not be zero"));
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn for_tests(media_dir: &std::path::Path) -> Self {
        use crate::util::Sensitive;

        Self {
            ip: Self::default_ip(),
            port: 0,
            workers: 1,
            auth: Auth {
                jwt_secret: Sensitive::new("chirper-test-secret".into()),
                token_lifetime_secs: 3600,
            },
            database: Database::default(),
            media: Media {
                dir: media_dir.to_path_buf(),
                ..Media::default()
            },
            limits: Limits::default(),
            logging: Logging::default(),
        }
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "chirper.toml";
    const DEFAULT_PORT: u16 = 8080;

    fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    const fn default_port() -> u16 {
        Self::DEFAULT_PORT
    }

    fn default_workers() -> usize {
        std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
    }

    /// Creates a default [`Figment`] object to load server
    /// configuration. This function is there for implementing
    /// [`Server::load`] and testing.
    ///
    /// [`Figment`]: figment::Figment
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            // Only the first underscore separates the section from the
            // key since most keys have underscores in them.
            .merge(Env::prefixed("CHIRPER_").map(|v| v.as_str().replacen('_', ".", 1).into()))
            // Environment variable aliases
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL", "MONGODB_URI", "JWT_SECRET"])
                    .map(|v| match v.as_str().to_ascii_uppercase().as_str() {
                        "JWT_SECRET" => "auth.jwt_secret".into(),
                        _ => "database.url".into(),
                    }),
            )
    }
}
