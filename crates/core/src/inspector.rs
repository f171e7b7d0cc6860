//! Name-level entry points: methods, constructors and fields of a receiver
//! type named in Java source syntax.

use crate::conversion;
use crate::error::{JbindError, Result};
use crate::resolver::{OverloadResolver, Resolution, ResolutionFlags};
use crate::signature::{ArgumentSpec, ResolvedArguments};
use jbind_api::{
    CONSTRUCTOR_NAME, FieldInfo, Member, MemberKind, Primitive, TypeDirectory, TypeHandle,
};

/// Actual argument types of a call, as type names.
///
/// An empty object type name is an untyped null. When primitive types are
/// supplied, an empty entry means the argument has no primitive form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentTypes {
    pub object_types: Vec<String>,
    pub primitive_types: Option<Vec<String>>,
    /// Marks arguments that are `?` parameter markers.
    pub parameters: Vec<bool>,
}

impl ArgumentTypes {
    pub fn new<I, S>(object_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let object_types: Vec<String> = object_types.into_iter().map(Into::into).collect();
        let parameters = vec![false; object_types.len()];
        Self {
            object_types,
            primitive_types: None,
            parameters,
        }
    }

    pub fn with_primitives<I, S>(mut self, primitive_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primitive_types = Some(primitive_types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = bool>) -> Self {
        self.parameters = parameters.into_iter().collect();
        self
    }

    /// The same arguments with the primitive forms dropped.
    pub fn without_primitives(&self) -> Self {
        Self {
            primitive_types: None,
            ..self.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.object_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_types.is_empty()
    }

    fn validate(&self) -> Result<()> {
        if self.parameters.len() != self.len() {
            return Err(JbindError::InvalidArguments(format!(
                "{} argument types but {} parameter markers",
                self.len(),
                self.parameters.len()
            )));
        }
        if let Some(primitives) = &self.primitive_types
            && primitives.len() != self.len()
        {
            return Err(JbindError::InvalidArguments(format!(
                "{} argument types but {} primitive types",
                self.len(),
                primitives.len()
            )));
        }
        Ok(())
    }
}

/// Looks up methods, constructors and fields through a [`TypeDirectory`].
pub struct ClassInspector<D> {
    directory: D,
}

impl<D: TypeDirectory> ClassInspector<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Find the public method `name` of `receiver` that accepts `arguments`.
    ///
    /// With `arguments == None` this only probes for a public method called
    /// `name`, honoring the static and varargs flags. Primitive receivers
    /// have no methods.
    pub fn find_method(
        &self,
        receiver: &str,
        name: &str,
        arguments: Option<&ArgumentTypes>,
        flags: ResolutionFlags,
    ) -> Result<Option<Member>> {
        let receiver_type = self.directory.resolve_type_by_name(receiver)?;
        if receiver_type.is_primitive() {
            return Ok(None);
        }

        let Some(arguments) = arguments else {
            return self.probe_method(&receiver_type, name, flags);
        };
        let resolved = self.resolve_arguments(arguments)?;

        if resolved.is_empty() {
            let exact = self
                .directory
                .list_members(&receiver_type, MemberKind::Method, Some(name))?
                .into_iter()
                .find(|m| m.parameters.is_empty());
            match exact {
                Some(method) => return Ok((!flags.static_only || method.is_static).then_some(method)),
                // Interfaces still need the root object's methods.
                None if !receiver_type.is_interface() => return Ok(None),
                None => {}
            }
        }

        let mut candidates = self
            .directory
            .list_members(&receiver_type, MemberKind::Method, None)?;
        if receiver_type.is_interface() {
            let root = self.directory.root_object_type();
            candidates.extend(self.directory.list_members(&root, MemberKind::Method, None)?);
        }

        self.settle(&receiver_type, name, &resolved, flags, candidates)
    }

    /// Two-pass method lookup: first without primitive forms, then, if that
    /// finds nothing and primitive forms were given, with them.
    pub fn resolve_method(
        &self,
        receiver: &str,
        name: &str,
        arguments: &ArgumentTypes,
        flags: ResolutionFlags,
    ) -> Result<Option<Member>> {
        let first = arguments.without_primitives();
        if let Some(method) = self.find_method(receiver, name, Some(&first), flags)? {
            return Ok(Some(method));
        }
        if arguments.primitive_types.is_none() {
            return Ok(None);
        }
        tracing::debug!("Retrying {}.{} with primitive argument types", receiver, name);
        self.find_method(receiver, name, Some(arguments), flags)
    }

    /// Find the public constructor of `receiver` that accepts `arguments`.
    ///
    /// Arrays, primitives and interfaces have no constructors.
    pub fn find_constructor(
        &self,
        receiver: &str,
        arguments: &ArgumentTypes,
    ) -> Result<Option<Member>> {
        let receiver_type = self.directory.resolve_type_by_name(receiver)?;
        if receiver_type.is_array() || receiver_type.is_primitive() || receiver_type.is_interface()
        {
            return Ok(None);
        }

        let resolved = self.resolve_arguments(arguments)?;
        let constructors =
            self.directory
                .list_members(&receiver_type, MemberKind::Constructor, None)?;

        let known: Option<Vec<TypeHandle>> = resolved
            .specs
            .iter()
            .map(|spec| spec.object_type.clone())
            .collect();
        if let Some(types) = known
            && !resolved.has_primitives
        {
            if let Some(exact) = constructors.iter().find(|c| c.has_signature(&types)) {
                return Ok(Some(exact.clone()));
            }
            if types.is_empty() {
                return Ok(None);
            }
        }

        self.settle(
            &receiver_type,
            CONSTRUCTOR_NAME,
            &resolved,
            ResolutionFlags::default(),
            constructors,
        )
    }

    /// Two-pass constructor lookup, the counterpart of [`Self::resolve_method`].
    pub fn resolve_constructor(
        &self,
        receiver: &str,
        arguments: &ArgumentTypes,
    ) -> Result<Option<Member>> {
        if let Some(constructor) = self.find_constructor(receiver, &arguments.without_primitives())? {
            return Ok(Some(constructor));
        }
        if arguments.primitive_types.is_none() {
            return Ok(None);
        }
        self.find_constructor(receiver, arguments)
    }

    /// Find the public field `field_name` visible through `receiver`.
    ///
    /// A public field inherited from a supertype is hidden when the receiver
    /// class itself declares a non-public field of the same name. Every
    /// failure, including an unresolvable receiver, is reported as
    /// [`JbindError::NoField`].
    pub fn find_field(&self, receiver: &str, field_name: &str, static_only: bool) -> Result<FieldInfo> {
        let no_field = |cause| JbindError::NoField {
            field: field_name.to_string(),
            receiver: receiver.to_string(),
            is_static: static_only,
            cause,
        };

        let receiver_type = self
            .directory
            .resolve_type_by_name(receiver)
            .map_err(|e| no_field(Some(e)))?;
        if receiver_type.is_array() || receiver_type.is_primitive() {
            return Err(no_field(None));
        }

        let field = self
            .directory
            .find_public_field(&receiver_type, field_name)
            .map_err(|e| no_field(Some(e)))?;
        if static_only && !field.is_static {
            return Err(no_field(None));
        }
        if receiver_type.is_interface() || field.declaring_type == receiver_type {
            return Ok(field);
        }

        let hidden = self
            .directory
            .declared_fields(&receiver_type)
            .map_err(|e| no_field(Some(e)))?
            .into_iter()
            .any(|declared| declared.name == field_name && !declared.is_public());
        if hidden {
            tracing::debug!(
                "Field {}.{} is hidden by a non-public declaration in {}",
                field.declaring_type,
                field_name,
                receiver_type
            );
            return Err(no_field(None));
        }
        Ok(field)
    }

    /// The primitive keyword for a wrapper class name, e.g. `int` for
    /// `java.lang.Integer`.
    pub fn primitive_type(wrapper: &str) -> Option<&'static str> {
        Primitive::from_wrapper_name(wrapper).map(Primitive::keyword)
    }

    pub fn is_primitive_name(name: &str) -> bool {
        jbind_api::is_primitive_name(name)
    }

    /// Numeric primitives and their wrapper classes.
    pub fn is_numeric_type(name: &str) -> bool {
        Primitive::from_keyword(name)
            .or_else(|| Primitive::from_wrapper_name(name))
            .is_some_and(Primitive::is_numeric)
    }

    /// Whether `name` resolves to a publicly accessible type.
    pub fn accessible(&self, name: &str) -> bool {
        self.directory
            .resolve_type_by_name(name)
            .is_ok_and(|ty| self.directory.is_accessible(&ty))
    }

    /// Reference assignability by name. Unresolvable names are never assignable.
    pub fn assignable_to(&self, from: &str, to: &str) -> bool {
        match (
            self.directory.resolve_type_by_name(from),
            self.directory.resolve_type_by_name(to),
        ) {
            (Ok(from), Ok(to)) => conversion::is_assignable(&self.directory, &from, &to),
            _ => false,
        }
    }

    pub fn is_convertible(&self, from: &str, to: &str, mix_types: bool) -> Result<bool> {
        let from = self.directory.resolve_type_by_name(from)?;
        let to = self.directory.resolve_type_by_name(to)?;
        Ok(conversion::is_convertible(&self.directory, &from, &to, mix_types))
    }

    /// Resolve `name` and render it in source syntax.
    pub fn type_display_name(&self, name: &str) -> Result<String> {
        Ok(self.directory.resolve_type_by_name(name)?.to_string())
    }

    fn probe_method(
        &self,
        receiver_type: &TypeHandle,
        name: &str,
        flags: ResolutionFlags,
    ) -> Result<Option<Member>> {
        Ok(self
            .directory
            .list_members(receiver_type, MemberKind::Method, Some(name))?
            .into_iter()
            .find(|m| (!flags.static_only || m.is_static) && (!flags.varargs || m.is_varargs)))
    }

    fn resolve_arguments(&self, arguments: &ArgumentTypes) -> Result<ResolvedArguments> {
        arguments.validate()?;

        let resolve = |name: &str| -> Result<Option<TypeHandle>> {
            if name.is_empty() {
                return Ok(None);
            }
            Ok(Some(self.directory.resolve_type_by_name(name)?))
        };

        let mut specs = Vec::with_capacity(arguments.len());
        for (index, object_type) in arguments.object_types.iter().enumerate() {
            let primitive_type = match &arguments.primitive_types {
                Some(primitives) => resolve(&primitives[index])?,
                None => None,
            };
            specs.push(ArgumentSpec {
                object_type: resolve(object_type)?,
                primitive_type,
                is_parameter: arguments.parameters[index],
            });
        }

        let resolved = ResolvedArguments::new(specs);
        Ok(if arguments.primitive_types.is_some() {
            resolved.with_primitives()
        } else {
            resolved
        })
    }

    fn settle(
        &self,
        receiver_type: &TypeHandle,
        name: &str,
        arguments: &ResolvedArguments,
        flags: ResolutionFlags,
        candidates: Vec<Member>,
    ) -> Result<Option<Member>> {
        match OverloadResolver::new(&self.directory).resolve(name, arguments, flags, candidates) {
            Resolution::Unique(member) => Ok(Some(member)),
            Resolution::NoMatch => Ok(None),
            Resolution::Ambiguous(candidates) => Err(JbindError::AmbiguousInvocation {
                receiver: receiver_type.to_string(),
                member: name.to_string(),
                arguments: arguments.render(),
                candidates,
            }),
        }
    }
}
