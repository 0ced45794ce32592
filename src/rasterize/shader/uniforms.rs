use std::collections::HashMap;

/// Location OpenGL reports for uniforms that do not exist or were
/// optimized out by the compiler.
pub const INVALID_LOCATION: gl::types::GLint = -1;

/// Uniform name to location map owned by a single program.
///
/// Programs are immutable after linking so entries never need
/// invalidation.
#[derive(Debug, Default)]
pub struct UniformCache {
    locations: HashMap<String, gl::types::GLint>,
}

impl UniformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of `name`, `lookup` runs only the first time a name
    /// is asked for. Missing uniforms are cached too and reported
    /// once.
    pub fn location<F>(&mut self, name: &str, lookup: F) -> gl::types::GLint
    where
        F: FnOnce(&str) -> gl::types::GLint,
    {
        if let Some(&location) = self.locations.get(name) {
            return location;
        }

        let location = lookup(name);
        if location == INVALID_LOCATION {
            log::warn!("uniform `{}` doesn't exist", name);
        }
        self.locations.insert(name.to_string(), location);
        location
    }

    pub fn get(&self, name: &str) -> Option<gl::types::GLint> {
        self.locations.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
