//! Reducers for module structure: the header, exports and imports, the
//! two assignment forms, and the final module closer.
//!
//! The module closer is the largest reducer in the crate but follows the
//! usual shape: everything the header and body pushed is still on the
//! stack in order, so it pops assignments, then each optional header
//! item, then the module name, and leaves a single `Module` behind.

use crate::ast::{
    Assignment, Exports, Module, OidComponent, SymbolsFromModule, TagDefault, Value,
};
use crate::grammar::Asn1Rules;
use crate::peg::GrammarBuilder;

use super::{mismatch, pop1, pop2, pop3, reduce, Item};

pub(super) fn install(b: &mut GrammarBuilder, r: &Asn1Rules) {
    // Clause 13: the definitive object identifier in the module name.

    b.apply(
        r.definitive_oid_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::OidValue(Vec::new()));
            Ok(true)
        }),
    );
    b.apply(
        r.definitive_name_and_number,
        reduce(|stack, _, _| {
            let (mut list, name, n) = match pop3(stack, "DefinitiveNameAndNumberForm")? {
                (Item::OidValue(l), Item::Identifier(id), Item::Number(n)) => (l, id, n),
                (_, _, other) => return Err(mismatch("DefinitiveNameAndNumberForm", &other)),
            };
            list.push(OidComponent::NameAndNumber(name, n));
            stack.push(Item::OidValue(list));
            Ok(true)
        }),
    );
    b.apply(
        r.definitive_number,
        reduce(|stack, _, _| {
            let (mut list, n) = match pop2(stack, "DefinitiveNumberForm")? {
                (Item::OidValue(l), Item::Number(n)) => (l, n),
                (_, other) => return Err(mismatch("DefinitiveNumberForm", &other)),
            };
            list.push(OidComponent::Number(n));
            stack.push(Item::OidValue(list));
            Ok(true)
        }),
    );
    b.apply(
        r.definitive_name,
        reduce(|stack, _, _| {
            let (mut list, name) = match pop2(stack, "DefinitiveNameForm")? {
                (Item::OidValue(l), Item::Identifier(id)) => (l, id),
                (_, other) => return Err(mismatch("DefinitiveNameForm", &other)),
            };
            list.push(OidComponent::Name(name));
            stack.push(Item::OidValue(list));
            Ok(true)
        }),
    );

    b.apply(
        r.tag_default,
        reduce(|stack, _, txt| {
            let which = match txt.get() {
                t if t.starts_with("EXPLICIT") => TagDefault::Explicit,
                t if t.starts_with("IMPLICIT") => TagDefault::Implicit,
                _ => TagDefault::Automatic,
            };
            stack.push(Item::TagDefault(which));
            Ok(true)
        }),
    );

    // Exports and imports.

    b.apply(
        r.symbol,
        reduce(|stack, _, _| {
            match pop1(stack, "Symbol")? {
                Item::TypeRef(n) | Item::ValueRef(n) => stack.push(Item::Symbol(n)),
                other => return Err(mismatch("Symbol", &other)),
            }
            Ok(true)
        }),
    );
    b.apply(
        r.exports_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::Exports(Exports::Symbols(Vec::new())));
            Ok(true)
        }),
    );
    b.apply(
        r.exports_symbols,
        reduce(|stack, _, _| {
            let mut symbols = Vec::new();
            loop {
                match pop1(stack, "Exports")? {
                    Item::Symbol(s) => symbols.push(s),
                    Item::Exports(_) => break,
                    other => return Err(mismatch("Exports", &other)),
                }
            }
            symbols.reverse();
            stack.push(Item::Exports(Exports::Symbols(symbols)));
            Ok(true)
        }),
    );
    b.apply(
        r.exports_all,
        reduce(|stack, _, _| {
            stack.push(Item::Exports(Exports::All));
            Ok(true)
        }),
    );
    b.apply(
        r.symbols_from_module_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::SymbolsFromModuleMarker);
            Ok(true)
        }),
    );
    b.apply(
        r.assigned_identifier_value,
        reduce(|stack, _, _| {
            match pop1(stack, "AssignedIdentifier")? {
                Item::OidValue(l) => stack.push(Item::Value(Value::ObjectIdentifier(l))),
                v @ Item::Value(_) => stack.push(v),
                other => return Err(mismatch("AssignedIdentifier", &other)),
            }
            Ok(true)
        }),
    );
    b.apply(
        r.symbols_from_module,
        reduce(|stack, _, _| {
            let mut item = pop1(stack, "SymbolsFromModule")?;
            let identification = if let Item::Value(v) = item {
                item = pop1(stack, "SymbolsFromModule")?;
                Some(v)
            } else {
                None
            };
            let module = match item {
                Item::ModuleRef(m) => m,
                other => return Err(mismatch("SymbolsFromModule", &other)),
            };
            let mut symbols = Vec::new();
            loop {
                match pop1(stack, "SymbolsFromModule")? {
                    Item::Symbol(s) => symbols.push(s),
                    Item::SymbolsFromModuleMarker => break,
                    other => return Err(mismatch("SymbolsFromModule", &other)),
                }
            }
            symbols.reverse();
            stack.push(Item::SymbolsFromModule(SymbolsFromModule {
                symbols,
                module,
                identification,
            }));
            Ok(true)
        }),
    );
    b.apply(
        r.imports_introducer,
        reduce(|stack, _, _| {
            stack.push(Item::ImportsMarker);
            Ok(true)
        }),
    );
    b.apply(
        r.imports,
        reduce(|stack, _, _| {
            let mut list = Vec::new();
            loop {
                match pop1(stack, "Imports")? {
                    Item::SymbolsFromModule(m) => list.push(m),
                    Item::ImportsMarker => break,
                    other => return Err(mismatch("Imports", &other)),
                }
            }
            list.reverse();
            stack.push(Item::Imports(list));
            Ok(true)
        }),
    );

    // Clause 16: assignments.

    b.apply(
        r.type_assignment,
        reduce(|stack, _, _| {
            let (name, ty) = match pop2(stack, "TypeAssignment")? {
                (Item::TypeRef(n), Item::Type(t)) => (n, t),
                (_, other) => return Err(mismatch("TypeAssignment", &other)),
            };
            stack.push(Item::Assignment(Assignment::Type { name, ty }));
            Ok(true)
        }),
    );
    b.apply(
        r.value_assignment,
        reduce(|stack, _, _| {
            let (name, value) = match pop2(stack, "ValueAssignment")? {
                (Item::ValueRef(n), Item::Value(v)) => (n, v),
                (_, other) => return Err(mismatch("ValueAssignment", &other)),
            };
            stack.push(Item::Assignment(Assignment::Value { name, value }));
            Ok(true)
        }),
    );

    // The module closer.

    b.apply(
        r.module_definition,
        reduce(|stack, _, _| {
            let rule = "ModuleDefinition";
            let mut item = pop1(stack, rule)?;
            let mut assignments = Vec::new();
            while let Item::Assignment(a) = item {
                assignments.push(a);
                item = pop1(stack, rule)?;
            }
            assignments.reverse();
            let imports = if let Item::Imports(list) = item {
                item = pop1(stack, rule)?;
                list
            } else {
                Vec::new()
            };
            let exports = if let Item::Exports(e) = item {
                item = pop1(stack, rule)?;
                Some(e)
            } else {
                None
            };
            let tag_default = if let Item::TagDefault(t) = item {
                item = pop1(stack, rule)?;
                Some(t)
            } else {
                None
            };
            let encoding_reference = if let Item::EncodingRef(e) = item {
                item = pop1(stack, rule)?;
                Some(e)
            } else {
                None
            };
            let oid = if let Item::OidValue(l) = item {
                item = pop1(stack, rule)?;
                Some(l)
            } else {
                None
            };
            let name = match item {
                Item::ModuleRef(m) => m,
                other => return Err(mismatch(rule, &other)),
            };
            stack.push(Item::Module(Module {
                name,
                oid,
                encoding_reference,
                tag_default,
                exports,
                imports,
                assignments,
            }));
            Ok(true)
        }),
    );
}
