//! Host type descriptors.
//!
//! An [`ExternalType`] lists what a script may do with a host type:
//! read and write properties, call methods (overloads allowed), index it,
//! and construct it. The analyzer resolves against the declared types; the
//! interpreter invokes the handles.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serein_ir::ScriptType;

use crate::function::{async_handle, sync_handle};
use crate::{CallFuture, EvalError, Handle, Value};

type Getter = Arc<dyn Fn(&Value) -> Result<Value, EvalError> + Send + Sync>;
type Setter = Arc<dyn Fn(&Value, Value) -> Result<(), EvalError> + Send + Sync>;
type IndexGetter = Arc<dyn Fn(&Value, &Value) -> Result<Value, EvalError> + Send + Sync>;
type IndexSetter = Arc<dyn Fn(&Value, Value, Value) -> Result<(), EvalError> + Send + Sync>;
type Constructor = Arc<dyn Fn(Vec<Value>) -> Result<Value, EvalError> + Send + Sync>;

/// A named property with a getter and an optional setter.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: Arc<str>,
    ty: ScriptType,
    getter: Getter,
    setter: Option<Setter>,
}

impl PropertyDescriptor {
    pub fn new<G>(name: &str, ty: ScriptType, getter: G) -> Self
    where
        G: Fn(&Value) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        PropertyDescriptor {
            name: Arc::from(name),
            ty,
            getter: Arc::new(getter),
            setter: None,
        }
    }

    #[must_use]
    pub fn with_setter<S>(mut self, setter: S) -> Self
    where
        S: Fn(&Value, Value) -> Result<(), EvalError> + Send + Sync + 'static,
    {
        self.setter = Some(Arc::new(setter));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ScriptType {
        &self.ty
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub fn get(&self, receiver: &Value) -> Result<Value, EvalError> {
        (self.getter)(receiver)
    }

    pub fn set(&self, receiver: &Value, value: Value) -> Result<(), EvalError> {
        match &self.setter {
            Some(setter) => setter(receiver, value),
            None => Err(EvalError::host(format!(
                "property `{}` is read-only",
                self.name
            ))),
        }
    }
}

/// One method overload.
#[derive(Clone)]
pub struct MethodDescriptor {
    name: Arc<str>,
    params: Vec<ScriptType>,
    ret: ScriptType,
    handle: Handle,
}

impl MethodDescriptor {
    pub fn new<F>(name: &str, params: Vec<ScriptType>, ret: ScriptType, f: F) -> Self
    where
        F: Fn(&Value, Vec<Value>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        MethodDescriptor {
            name: Arc::from(name),
            params,
            ret,
            handle: sync_handle(f),
        }
    }

    /// An asynchronous overload returning `Task` (for a `Void` result) or
    /// `Task<result>`.
    pub fn new_async<F, Fut>(name: &str, params: Vec<ScriptType>, result: ScriptType, f: F) -> Self
    where
        F: Fn(Value, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, EvalError>> + Send + 'static,
    {
        let ret = match result {
            ScriptType::Void => ScriptType::task(None),
            other => ScriptType::task(Some(other)),
        };
        MethodDescriptor {
            name: Arc::from(name),
            params,
            ret,
            handle: async_handle(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ScriptType] {
        &self.params
    }

    pub fn return_type(&self) -> &ScriptType {
        &self.ret
    }

    pub fn is_async(&self) -> bool {
        matches!(self.ret, ScriptType::Task(_))
    }

    pub fn invoke(&self, receiver: Value, args: Vec<Value>) -> CallFuture {
        (self.handle)(receiver, args)
    }
}

/// A single-parameter indexer, `obj[key]`.
#[derive(Clone)]
pub struct IndexerDescriptor {
    key: ScriptType,
    value: ScriptType,
    getter: IndexGetter,
    setter: Option<IndexSetter>,
}

impl IndexerDescriptor {
    pub fn new<G>(key: ScriptType, value: ScriptType, getter: G) -> Self
    where
        G: Fn(&Value, &Value) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        IndexerDescriptor {
            key,
            value,
            getter: Arc::new(getter),
            setter: None,
        }
    }

    #[must_use]
    pub fn with_setter<S>(mut self, setter: S) -> Self
    where
        S: Fn(&Value, Value, Value) -> Result<(), EvalError> + Send + Sync + 'static,
    {
        self.setter = Some(Arc::new(setter));
        self
    }

    pub fn key_type(&self) -> &ScriptType {
        &self.key
    }

    pub fn value_type(&self) -> &ScriptType {
        &self.value
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub fn get(&self, receiver: &Value, key: &Value) -> Result<Value, EvalError> {
        (self.getter)(receiver, key)
    }

    pub fn set(&self, receiver: &Value, key: Value, value: Value) -> Result<(), EvalError> {
        match &self.setter {
            Some(setter) => setter(receiver, key, value),
            None => Err(EvalError::host("indexer is read-only")),
        }
    }
}

/// One constructor overload.
#[derive(Clone)]
pub struct ConstructorDescriptor {
    params: Vec<ScriptType>,
    handle: Constructor,
}

impl ConstructorDescriptor {
    pub fn new<F>(params: Vec<ScriptType>, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        ConstructorDescriptor {
            params,
            handle: Arc::new(f),
        }
    }

    pub fn params(&self) -> &[ScriptType] {
        &self.params
    }

    pub fn construct(&self, args: Vec<Value>) -> Result<Value, EvalError> {
        (self.handle)(args)
    }
}

/// A host type mounted into an engine.
#[derive(Clone)]
pub struct ExternalType {
    name: Arc<str>,
    properties: FxHashMap<Arc<str>, PropertyDescriptor>,
    methods: FxHashMap<Arc<str>, Vec<MethodDescriptor>>,
    indexer: Option<IndexerDescriptor>,
    constructors: Vec<ConstructorDescriptor>,
}

impl ExternalType {
    pub fn new(name: &str) -> Self {
        ExternalType {
            name: Arc::from(name),
            properties: FxHashMap::default(),
            methods: FxHashMap::default(),
            indexer: None,
            constructors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.insert(Arc::clone(&property.name), property);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods
            .entry(Arc::clone(&method.name))
            .or_default()
            .push(method);
        self
    }

    #[must_use]
    pub fn with_indexer(mut self, indexer: IndexerDescriptor) -> Self {
        self.indexer = Some(indexer);
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// The same descriptor under another name.
    #[must_use]
    pub fn renamed(&self, name: &str) -> Self {
        ExternalType {
            name: Arc::from(name),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn indexer(&self) -> Option<&IndexerDescriptor> {
        self.indexer.as_ref()
    }

    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// Overload of `name` for statically known argument types. Exact
    /// matches win over assignable ones; `object` arguments match anything.
    pub fn resolve_method(&self, name: &str, args: &[ScriptType]) -> Option<&MethodDescriptor> {
        let candidates = self.methods.get(name)?;
        select_overload(candidates, MethodDescriptor::params, args, static_fits)
    }

    /// Overload of `name` for runtime argument values.
    pub fn select_method(&self, name: &str, args: &[Value]) -> Option<&MethodDescriptor> {
        let candidates = self.methods.get(name)?;
        select_overload(candidates, MethodDescriptor::params, args, runtime_fits)
    }

    pub fn resolve_constructor(&self, args: &[ScriptType]) -> Option<&ConstructorDescriptor> {
        select_overload(&self.constructors, ConstructorDescriptor::params, args, static_fits)
    }

    pub fn select_constructor(&self, args: &[Value]) -> Option<&ConstructorDescriptor> {
        select_overload(&self.constructors, ConstructorDescriptor::params, args, runtime_fits)
    }
}

impl fmt::Debug for ExternalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut properties: Vec<&str> = self.properties.keys().map(|k| &**k).collect();
        properties.sort_unstable();
        let mut methods: Vec<&str> = self.methods.keys().map(|k| &**k).collect();
        methods.sort_unstable();
        f.debug_struct("ExternalType")
            .field("name", &self.name)
            .field("properties", &properties)
            .field("methods", &methods)
            .field("indexer", &self.indexer.is_some())
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

/// How well an argument fits a parameter.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Fit {
    Exact,
    Assignable,
    No,
}

fn static_fits(param: &ScriptType, arg: &ScriptType) -> Fit {
    if param == arg {
        Fit::Exact
    } else if param.accepts(arg) || *arg == ScriptType::Object {
        Fit::Assignable
    } else {
        Fit::No
    }
}

fn runtime_fits(param: &ScriptType, arg: &Value) -> Fit {
    if arg.is_null() {
        return if param.is_reference() {
            Fit::Assignable
        } else {
            Fit::No
        };
    }
    let ty = arg.runtime_type();
    if *param == ty {
        Fit::Exact
    } else if param.accepts(&ty) {
        Fit::Assignable
    } else {
        Fit::No
    }
}

fn select_overload<'a, T, A>(
    candidates: &'a [T],
    params: fn(&T) -> &[ScriptType],
    args: &[A],
    fits: fn(&ScriptType, &A) -> Fit,
) -> Option<&'a T> {
    let score = |candidate: &T| -> Fit {
        let params = params(candidate);
        if params.len() != args.len() {
            return Fit::No;
        }
        let mut overall = Fit::Exact;
        for (param, arg) in params.iter().zip(args) {
            match fits(param, arg) {
                Fit::No => return Fit::No,
                Fit::Assignable => overall = Fit::Assignable,
                Fit::Exact => {}
            }
        }
        overall
    };
    candidates
        .iter()
        .find(|c| score(*c) == Fit::Exact)
        .or_else(|| candidates.iter().find(|c| score(*c) == Fit::Assignable))
}
