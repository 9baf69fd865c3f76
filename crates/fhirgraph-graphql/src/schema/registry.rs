//! Two-pass shape registry.
//!
//! The generated schema is a graph of mutually referring shapes (Account
//! references Organization references Account, ...). Rather than relying on
//! lazy evaluation order to break the cycles, the registry builds the graph
//! in two explicit passes: pass one declares every shape identifier, pass
//! two supplies the definitions whose field sets refer to other shapes
//! strictly by declared name. `install` then hands the whole set to the
//! schema builder, rejecting declarations that never received a definition.

use std::collections::{BTreeMap, BTreeSet};

use async_graphql::dynamic::{InputObject, Object, Scalar, SchemaBuilder, Union};

/// Errors from registry misuse. These indicate a bug in schema generation,
/// not bad client input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The same shape name was declared twice.
    #[error("shape '{0}' declared twice")]
    DuplicateShape(String),

    /// A definition or field reference names a shape that was never
    /// declared.
    #[error("shape '{0}' was never declared")]
    UndeclaredShape(String),

    /// A declared shape never received a definition.
    #[error("shape '{0}' declared but never defined")]
    UndefinedShape(String),
}

/// A defined schema shape.
pub enum RegisteredType {
    /// An output object type.
    Object(Object),
    /// A union type.
    Union(Union),
    /// An input object type.
    Input(InputObject),
    /// A scalar type.
    Scalar(Scalar),
}

/// Shape graph under construction.
#[derive(Default)]
pub struct ShapeRegistry {
    declared: BTreeSet<String>,
    defined: BTreeMap<String, RegisteredType>,
}

impl ShapeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pass one: declares a shape identifier.
    ///
    /// # Errors
    ///
    /// `RegistryError::DuplicateShape` if the name is already declared.
    pub fn declare(&mut self, name: impl Into<String>) -> Result<(), RegistryError> {
        let name = name.into();
        if !self.declared.insert(name.clone()) {
            return Err(RegistryError::DuplicateShape(name));
        }
        Ok(())
    }

    /// Returns true if the shape identifier is declared.
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Asserts that a field's target shape is declared; used while wiring
    /// pass-two definitions so a dangling reference fails the build instead
    /// of producing a schema with unresolvable type names.
    ///
    /// # Errors
    ///
    /// `RegistryError::UndeclaredShape` if the name is unknown.
    pub fn expect_declared(&self, name: &str) -> Result<(), RegistryError> {
        if self.is_declared(name) {
            Ok(())
        } else {
            Err(RegistryError::UndeclaredShape(name.to_string()))
        }
    }

    /// Pass two: supplies the definition for a declared shape.
    ///
    /// # Errors
    ///
    /// `RegistryError::UndeclaredShape` if the name was never declared,
    /// `RegistryError::DuplicateShape` if it was already defined.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        shape: RegisteredType,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if !self.declared.contains(&name) {
            return Err(RegistryError::UndeclaredShape(name));
        }
        if self.defined.contains_key(&name) {
            return Err(RegistryError::DuplicateShape(name));
        }
        self.defined.insert(name, shape);
        Ok(())
    }

    /// Registers every defined shape into the schema builder.
    ///
    /// # Errors
    ///
    /// `RegistryError::UndefinedShape` if any declared shape has no
    /// definition.
    pub fn install(self, mut builder: SchemaBuilder) -> Result<SchemaBuilder, RegistryError> {
        if let Some(missing) = self
            .declared
            .iter()
            .find(|name| !self.defined.contains_key(*name))
        {
            return Err(RegistryError::UndefinedShape(missing.clone()));
        }

        for (_, shape) in self.defined {
            builder = match shape {
                RegisteredType::Object(o) => builder.register(o),
                RegisteredType::Union(u) => builder.register(u),
                RegisteredType::Input(i) => builder.register(i),
                RegisteredType::Scalar(s) => builder.register(s),
            };
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_twice_fails() {
        let mut registry = ShapeRegistry::new();
        registry.declare("Patient").unwrap();
        assert_eq!(
            registry.declare("Patient"),
            Err(RegistryError::DuplicateShape("Patient".into()))
        );
    }

    #[test]
    fn test_define_requires_declaration() {
        let mut registry = ShapeRegistry::new();
        let result = registry.define(
            "Patient",
            RegisteredType::Scalar(Scalar::new("Patient")),
        );
        assert_eq!(result, Err(RegistryError::UndeclaredShape("Patient".into())));
    }

    #[test]
    fn test_expect_declared() {
        let mut registry = ShapeRegistry::new();
        registry.declare("Patient").unwrap();
        assert!(registry.expect_declared("Patient").is_ok());
        assert_eq!(
            registry.expect_declared("Device"),
            Err(RegistryError::UndeclaredShape("Device".into()))
        );
    }

    #[test]
    fn test_install_rejects_undefined() {
        let mut registry = ShapeRegistry::new();
        registry.declare("Orphan").unwrap();

        let builder = async_graphql::dynamic::Schema::build("Query", None, None);
        let result = registry.install(builder);
        assert!(matches!(result, Err(RegistryError::UndefinedShape(name)) if name == "Orphan"));
    }
}
