//! Instance output directories.

use std::fs;
use std::io;
use std::path::Path;

use solvereview_core::instance::{LISTING_FILE, LOG_FILE, PROFILE_FILE};
use solvereview_core::Instance;

use crate::{ListingFixture, LogFixture, ProfileFixture};

/// The three reports one solver run leaves in its output directory.
///
/// A `None` report is not written, which lets tests exercise missing files.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceFixture {
    pub name: String,
    pub log: Option<LogFixture>,
    pub listing: Option<ListingFixture>,
    pub profile: Option<ProfileFixture>,
}

impl InstanceFixture {
    /// A full-solve instance with default reports.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            log: Some(LogFixture::new()),
            listing: Some(ListingFixture::new()),
            profile: Some(ProfileFixture::typical()),
        }
    }

    /// An instance that loaded a solution instead of solving.
    pub fn load_only(name: &str) -> Self {
        Self {
            log: Some(LogFixture::load_only()),
            ..Self::new(name)
        }
    }

    pub fn with_log(mut self, log: LogFixture) -> Self {
        self.log = Some(log);
        self
    }

    pub fn with_listing(mut self, listing: ListingFixture) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn with_profile(mut self, profile: ProfileFixture) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn without_log(mut self) -> Self {
        self.log = None;
        self
    }

    pub fn without_profile(mut self) -> Self {
        self.profile = None;
        self
    }

    /// Writes the reports into `root/<name>` and returns the instance.
    pub fn write_to(&self, root: &Path) -> io::Result<Instance> {
        let dir = root.join(&self.name);
        fs::create_dir_all(&dir)?;
        if let Some(log) = &self.log {
            fs::write(dir.join(LOG_FILE), log.render())?;
        }
        if let Some(listing) = &self.listing {
            fs::write(dir.join(LISTING_FILE), listing.render())?;
        }
        if let Some(profile) = &self.profile {
            fs::write(dir.join(PROFILE_FILE), profile.render())?;
        }
        Ok(Instance::new(self.name.as_str(), dir))
    }
}
