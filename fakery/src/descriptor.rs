// vim: tw=80
//! Identification of fakeable members and their parameters.

use std::any::{self, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A runtime type tag: identity plus a human-readable name.
///
/// Equality and hashing consider only the `TypeId`; the name exists for
/// rendering signatures in diagnostics.
#[derive(Clone, Copy, Debug, Eq)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
}

impl TypeDesc {
    pub fn of<T: 'static>() -> Self {
        TypeDesc { id: TypeId::of::<T>(), name: any::type_name::<T>() }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for TypeDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// How an argument travels between the caller and the fake.
///
/// The interception layer assigns directions from true reference semantics.
/// A by-value parameter is `In` no matter what the source declaration looked
/// like; only a genuine output slot may be tagged `Out`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    In,
    Ref,
    Out,
}

/// One declared parameter of a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Param {
    ty: TypeDesc,
    direction: Direction,
    variadic: bool,
}

impl Param {
    pub fn ty(&self) -> TypeDesc {
        self.ty
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True for a trailing parameter array: one declared parameter that
    /// aggregates a variable number of actual arguments.
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }
}

/// Placeholder type behind [`MemberDescriptor::generic_param`].
#[derive(Debug, PartialEq)]
enum GenericSlot {}

/// Identifies a method or property on a faked type.
///
/// Equality is structural.  Two calls to the same generic method
/// instantiated with different type arguments are distinct members.
///
/// ```
/// use fakery::MemberDescriptor;
///
/// let bar = MemberDescriptor::method("IFoo.Bar")
///     .param::<i32>()
///     .returns::<bool>();
/// assert_eq!(bar.name(), "IFoo.Bar");
/// assert_eq!(bar.params().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDescriptor {
    name: String,
    params: Vec<Param>,
    type_args: Vec<TypeDesc>,
    return_type: Option<TypeDesc>,
}

impl MemberDescriptor {
    /// Start describing a method with the given display name.
    pub fn method(name: impl Into<String>) -> Self {
        MemberDescriptor {
            name: name.into(),
            params: Vec::new(),
            type_args: Vec::new(),
            return_type: None,
        }
    }

    /// Start describing a property.  Index parameters, if any, are added
    /// with [`param`](#method.param) and the property type with
    /// [`returns`](#method.returns).
    pub fn property(name: impl Into<String>) -> Self {
        Self::method(name)
    }

    /// Append an ordinary by-value parameter.
    pub fn param<T: 'static>(mut self) -> Self {
        self.params.push(Param {
            ty: TypeDesc::of::<T>(),
            direction: Direction::In,
            variadic: false,
        });
        self
    }

    /// Append a by-reference parameter.
    pub fn ref_param<T: 'static>(mut self) -> Self {
        self.params.push(Param {
            ty: TypeDesc::of::<T>(),
            direction: Direction::Ref,
            variadic: false,
        });
        self
    }

    /// Append an output parameter.
    pub fn out_param<T: 'static>(mut self) -> Self {
        self.params.push(Param {
            ty: TypeDesc::of::<T>(),
            direction: Direction::Out,
            variadic: false,
        });
        self
    }

    /// Append a by-value parameter whose type is a generic slot, filled in
    /// by the instantiation active at the call site.  Only meaningful on a
    /// descriptor that leaves its type arguments unspecified.
    pub fn generic_param(mut self) -> Self {
        self.params.push(Param {
            ty: TypeDesc::of::<GenericSlot>(),
            direction: Direction::In,
            variadic: false,
        });
        self
    }

    /// Append a trailing parameter array with elements of type `T`.  Must be
    /// the final parameter.
    pub fn variadic_param<T: 'static>(mut self) -> Self {
        self.params.push(Param {
            ty: TypeDesc::of::<T>(),
            direction: Direction::In,
            variadic: true,
        });
        self
    }

    /// Append a resolved generic type argument.
    pub fn type_arg<T: 'static>(mut self) -> Self {
        self.type_args.push(TypeDesc::of::<T>());
        self
    }

    /// Declare the return type.  Members without one are void.
    pub fn returns<T: 'static>(mut self) -> Self {
        self.return_type = Some(TypeDesc::of::<T>());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn type_args(&self) -> &[TypeDesc] {
        &self.type_args
    }

    pub fn return_type(&self) -> Option<TypeDesc> {
        self.return_type
    }

    pub(crate) fn is_variadic(&self) -> bool {
        self.params.last().is_some_and(|p| p.variadic)
    }

    /// Would a configuration written against `self` apply to a call on
    /// `call`?  A matcher that left its type arguments unspecified is
    /// resolved against the instantiation active at the call site: its
    /// parameter types follow the call's, though the shape (arity,
    /// directions, variadic tail) must still agree.  Otherwise the
    /// instantiations must be identical; there is no covariant or
    /// contravariant acceptance.
    pub(crate) fn applies_to(&self, call: &MemberDescriptor) -> bool {
        if self.name != call.name {
            return false;
        }
        if self.type_args.is_empty() && !call.type_args.is_empty() {
            return self.params.len() == call.params.len()
                && self.params.iter().zip(&call.params).all(|(a, b)| {
                    a.direction == b.direction && a.variadic == b.variadic
                });
        }
        self.params == call.params && self.type_args == call.type_args
    }

    /// Render `Name<T1, T2>(arg, arg)` with the given pre-rendered argument
    /// cells.
    pub(crate) fn render(&self, args: &[String]) -> String {
        let mut s = self.name.clone();
        if !self.type_args.is_empty() {
            s.push('<');
            for (i, t) in self.type_args.iter().enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                s.push_str(t.name());
            }
            s.push('>');
        }
        s.push('(');
        s.push_str(&args.join(", "));
        s.push(')');
        s
    }
}
