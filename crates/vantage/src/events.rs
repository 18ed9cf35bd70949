//! Object lifecycle events emitted by controllers.

/// A change to a controller's object set.
///
/// For any VID, the emitted sequence is always a subsequence of
/// `Added (Updated)* Deleted?`.
#[derive(Debug, Clone)]
pub enum ObjectEvent<T> {
    /// The object appeared in an enumeration for the first time.
    Added(T),
    /// One or more of the object's fields changed.
    Updated {
        /// The object, after the update.
        object: T,
        /// Names of the fields that changed.
        changed: Vec<&'static str>,
    },
    /// A subsequent enumeration no longer contained the object's VID.
    Deleted(T),
}
