//! C#-style declaration rendering.
//!
//! Types render in their short source form (`int`, `string?`, `List<int>`, `byte[]`), methods
//! as `[Visibility] [Modifier] ReturnType Name<Generic>(Parameters)`.

use crate::typesystem::{
    MethodDescriptor, ParamDescriptor, TypeDescriptor, TypeFlavor, TypeRc, TypeRef, WellKnownType,
};

/// Renders the source declaration of a type or member
pub trait Declaration {
    /// The declaration as it would appear in C# source
    fn declaration(&self) -> String;
}

fn keyword(ty: &TypeDescriptor) -> Option<&'static str> {
    let keyword = match ty.token {
        t if t == WellKnownType::Void.token() => "void",
        t if t == WellKnownType::Object.token() => "object",
        t if t == WellKnownType::String.token() => "string",
        t if t == WellKnownType::Boolean.token() => "bool",
        t if t == WellKnownType::Char.token() => "char",
        t if t == WellKnownType::SByte.token() => "sbyte",
        t if t == WellKnownType::Byte.token() => "byte",
        t if t == WellKnownType::Int16.token() => "short",
        t if t == WellKnownType::UInt16.token() => "ushort",
        t if t == WellKnownType::Int32.token() => "int",
        t if t == WellKnownType::UInt32.token() => "uint",
        t if t == WellKnownType::Int64.token() => "long",
        t if t == WellKnownType::UInt64.token() => "ulong",
        t if t == WellKnownType::Single.token() => "float",
        t if t == WellKnownType::Double.token() => "double",
        t if t == WellKnownType::Decimal.token() => "decimal",
        _ => return None,
    };
    Some(keyword)
}

fn type_ref_declaration(type_ref: &TypeRef) -> String {
    type_ref
        .upgrade()
        .map_or_else(|| "?".to_string(), |ty| ty.declaration())
}

fn strip_arity(name: &str) -> &str {
    match name.find('`') {
        Some(pos) => &name[..pos],
        None => name,
    }
}

impl Declaration for TypeRc {
    fn declaration(&self) -> String {
        self.as_ref().declaration()
    }
}

impl Declaration for TypeDescriptor {
    fn declaration(&self) -> String {
        if let Some(keyword) = keyword(self) {
            return keyword.to_string();
        }

        if let Some(element) = self.element_type() {
            let element = element.declaration();
            return match self.flavor {
                TypeFlavor::Array { rank } => format!("{element}{}", super::array_suffix(rank)),
                TypeFlavor::Pointer => format!("{element}*"),
                _ => element,
            };
        }

        let args = self.generic_arguments();
        if args.is_empty() {
            return self.name.clone();
        }

        let is_closed_nullable = self
            .generic_definition()
            .is_some_and(|definition| definition.token == WellKnownType::Nullable.token());
        if is_closed_nullable {
            return format!("{}?", args[0].declaration());
        }

        let rendered: Vec<String> = args.iter().map(|arg| arg.declaration()).collect();
        format!("{}<{}>", strip_arity(&self.name), rendered.join(", "))
    }
}

impl Declaration for ParamDescriptor {
    fn declaration(&self) -> String {
        let mut declaration = String::new();
        if let Some(keyword) = self.modifier.keyword() {
            declaration.push_str(keyword);
            declaration.push(' ');
        }
        declaration.push_str(&type_ref_declaration(&self.param_type));
        declaration.push(' ');
        declaration.push_str(&self.name);
        if let Some(default_value) = &self.default_value {
            declaration.push_str(" = ");
            declaration.push_str(default_value);
        }
        declaration
    }
}

impl Declaration for MethodDescriptor {
    fn declaration(&self) -> String {
        let mut declaration = String::new();

        let visibility = if self.is_public() {
            "public"
        } else if self.is_family() {
            "protected"
        } else if self.is_assembly() {
            "internal"
        } else if self.is_private() {
            "private"
        } else {
            "protected internal"
        };
        declaration.push_str(visibility);
        declaration.push(' ');

        let overrides = match (self.base_definition_type(), self.declaring_type()) {
            (Some(definition), Some(declaring)) => definition.token != declaring.token,
            _ => false,
        };
        let modifier = if self.is_abstract() {
            Some("abstract")
        } else if overrides {
            Some("override")
        } else if self.is_virtual() {
            Some("virtual")
        } else if self.is_static() {
            Some("static")
        } else {
            None
        };
        if let Some(modifier) = modifier {
            declaration.push_str(modifier);
            declaration.push(' ');
        }

        declaration.push_str(&type_ref_declaration(&self.return_type));
        declaration.push(' ');
        declaration.push_str(&self.name);

        if self.is_generic_method() {
            declaration.push('<');
            declaration.push_str(&self.generic_params.join(", "));
            declaration.push('>');
        }

        let params: Vec<String> = self.params.iter().map(Declaration::declaration).collect();
        declaration.push('(');
        declaration.push_str(&params.join(", "));
        declaration.push(')');

        declaration
    }
}
