//! Host objects.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An object owned by the host and exposed to scripts through an
/// [`ExternalType`](crate::ExternalType).
///
/// Implementations that hold resources override [`dispose`](Self::dispose);
/// it is called for every variable still holding the object when a run exits.
pub trait HostObject: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn dispose(&self) {}
}

/// A host object tagged with the name of its registered type.
#[derive(Clone)]
pub struct ExternalValue {
    type_name: Arc<str>,
    object: Arc<dyn HostObject>,
}

impl ExternalValue {
    pub fn new<T: HostObject>(type_name: &str, object: T) -> Self {
        ExternalValue {
            type_name: Arc::from(type_name),
            object: Arc::new(object),
        }
    }

    pub fn from_arc(type_name: &str, object: Arc<dyn HostObject>) -> Self {
        ExternalValue {
            type_name: Arc::from(type_name),
            object,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub(crate) fn type_name_arc(&self) -> &Arc<str> {
        &self.type_name
    }

    pub fn object(&self) -> &Arc<dyn HostObject> {
        &self.object
    }

    pub fn downcast_ref<T: HostObject>(&self) -> Option<&T> {
        self.object.as_any().downcast_ref::<T>()
    }

    pub fn dispose(&self) {
        self.object.dispose();
    }

    pub fn ptr_eq(&self, other: &ExternalValue) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.object), Arc::as_ptr(&other.object))
    }
}

impl fmt::Debug for ExternalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.type_name, self.object)
    }
}
