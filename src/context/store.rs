//! The execution context shared by every unit of one pipeline evaluation.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::tag::Tag;

/// A type-erased value stored in the context.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Thread-safe key/value store carrying data between stages.
///
/// Cloning an `ExecutionContext` yields another handle to the same storage.
/// Concurrent branches may read in parallel; writes are exclusive. The map
/// itself is only allocated on the first write.
///
/// Typed readers return `(value, exists)`. `exists` reports whether the tag
/// is present, not whether the stored value has the requested type: a
/// mismatch yields the type's zero value with `exists == true`.
///
/// ```
/// use phasegraph::ExecutionContext;
///
/// let ctx = ExecutionContext::new();
/// ctx.set("count", 123_i32);
/// assert_eq!(ctx.get_i32("count"), (123, true));
/// assert_eq!(ctx.get_string("count"), (String::new(), true));
/// assert_eq!(ctx.get_string("missing"), (String::new(), false));
/// ```
#[derive(Clone, Default)]
pub struct ExecutionContext {
    values: Arc<RwLock<Option<HashMap<Tag, Value>>>>,
}

macro_rules! typed_reader {
    ($(#[$doc:meta])* $name:ident => $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&self, tag: impl AsRef<str>) -> ($ty, bool) {
            self.get_as::<$ty>(tag)
        }
    };
}

impl ExecutionContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `tag`, replacing any previous value.
    pub fn set<T>(&self, tag: impl Into<Tag>, value: T)
    where
        T: Any + Send + Sync,
    {
        let mut guard = self.values.write();
        guard
            .get_or_insert_with(HashMap::new)
            .insert(tag.into(), Arc::new(value));
    }

    /// Get the raw value stored under `tag`.
    pub fn get(&self, tag: impl AsRef<str>) -> Option<Value> {
        let guard = self.values.read();
        guard.as_ref()?.get(tag.as_ref()).cloned()
    }

    /// Whether any value is stored under `tag`.
    pub fn contains(&self, tag: impl AsRef<str>) -> bool {
        let guard = self.values.read();
        guard
            .as_ref()
            .is_some_and(|values| values.contains_key(tag.as_ref()))
    }

    /// Remove the value stored under `tag`. Missing tags are ignored.
    pub fn delete(&self, tag: impl AsRef<str>) {
        let mut guard = self.values.write();
        if let Some(values) = guard.as_mut() {
            values.remove(tag.as_ref());
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.read().as_ref().map_or(0, HashMap::len)
    }

    /// Whether the context holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tags currently stored, sorted by name.
    pub fn tags(&self) -> Vec<Tag> {
        let guard = self.values.read();
        let mut tags: Vec<Tag> = guard
            .as_ref()
            .map(|values| values.keys().cloned().collect())
            .unwrap_or_default();
        tags.sort();
        tags
    }

    /// Read the value under `tag` as a `T`.
    ///
    /// Returns `(T::default(), false)` when the tag is absent and
    /// `(T::default(), true)` when the stored value is not a `T`.
    pub fn get_as<T>(&self, tag: impl AsRef<str>) -> (T, bool)
    where
        T: Any + Clone + Default,
    {
        match self.get(tag) {
            None => (T::default(), false),
            Some(value) => (value.downcast_ref::<T>().cloned().unwrap_or_default(), true),
        }
    }

    /// Read the value under `tag` as a string.
    ///
    /// Both `String` and `&'static str` values are accepted.
    pub fn get_string(&self, tag: impl AsRef<str>) -> (String, bool) {
        match self.get(tag) {
            None => (String::new(), false),
            Some(value) => {
                let text = if let Some(s) = value.downcast_ref::<String>() {
                    s.clone()
                } else if let Some(s) = value.downcast_ref::<&'static str>() {
                    (*s).to_string()
                } else {
                    String::new()
                };
                (text, true)
            }
        }
    }

    typed_reader!(
        /// Read the value under `tag` as a `bool`.
        get_bool => bool
    );
    typed_reader!(
        /// Read the value under `tag` as an `i8`.
        get_i8 => i8
    );
    typed_reader!(
        /// Read the value under `tag` as an `i16`.
        get_i16 => i16
    );
    typed_reader!(
        /// Read the value under `tag` as an `i32`.
        get_i32 => i32
    );
    typed_reader!(
        /// Read the value under `tag` as an `i64`.
        get_i64 => i64
    );
    typed_reader!(
        /// Read the value under `tag` as an `isize`.
        get_isize => isize
    );
    typed_reader!(
        /// Read the value under `tag` as a `u8`.
        get_u8 => u8
    );
    typed_reader!(
        /// Read the value under `tag` as a `u16`.
        get_u16 => u16
    );
    typed_reader!(
        /// Read the value under `tag` as a `u32`.
        get_u32 => u32
    );
    typed_reader!(
        /// Read the value under `tag` as a `u64`.
        get_u64 => u64
    );
    typed_reader!(
        /// Read the value under `tag` as a `usize`.
        get_usize => usize
    );
    typed_reader!(
        /// Read the value under `tag` as an `f32`.
        get_f32 => f32
    );
    typed_reader!(
        /// Read the value under `tag` as an `f64`.
        get_f64 => f64
    );
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("tags", &self.tags())
            .finish()
    }
}
