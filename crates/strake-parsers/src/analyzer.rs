use std::collections::HashMap;

use tree_sitter::{Node, Parser};

use strake_core::types::ContractKind;

/// Errors surfaced while turning a file's text into a declaration tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid syntax at line {line}")]
    Syntax { line: u32 },
    #[error("language error: {0}")]
    Language(String),
    #[error("parse failed")]
    ParseFailed,
}

/// Best-effort resolution of a decorator argument value.
///
/// The analyzer resolves what it can see in the module itself; everything
/// else (imported names, attribute accesses, call results) is reported as
/// [`ValueRef::Unresolved`] rather than failing the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueRef {
    /// An inline lambda, or a name bound to a function or lambda defined in
    /// the same module. Parameter names are in declaration order.
    Callable { params: Vec<String> },
    /// A string, number, bool, or `None` literal, as source text with string
    /// quotes stripped.
    Literal(String),
    /// The value could not be resolved.
    Unresolved,
}

/// One decorator attached to a function or class.
///
/// `capability` is `None` when the decorator is not a recognized contract
/// registration; such decorations carry no arguments.
#[derive(Debug, Clone)]
pub struct Decoration {
    pub line: u32,
    pub capability: Option<ContractKind>,
    pub positional: Vec<ValueRef>,
    pub keywords: Vec<(String, ValueRef)>,
}

/// A function or method declaration.
///
/// `line` points at the start of the decorated definition (the first
/// decorator when present), matching where function-level findings are
/// reported. `returns_value` is false only when the return annotation is
/// literally `None`.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub line: u32,
    pub params: Vec<String>,
    pub returns_value: bool,
    pub decorations: Vec<Decoration>,
    pub nested: Vec<Decl>,
}

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub line: u32,
    pub decorations: Vec<Decoration>,
    pub body: Vec<Decl>,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Function(FunctionDecl),
    Class(ClassDecl),
}

/// All declarations discovered in one module, in source order.
#[derive(Debug, Clone, Default)]
pub struct ModuleDecls {
    pub decls: Vec<Decl>,
}

/// Parse one module's text into its declaration tree.
///
/// Any error or missing node in the parse tree is reported as
/// [`ParseError::Syntax`] with the first offending line.
pub fn parse_module(source: &str) -> Result<ModuleDecls, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ParseError::Language(format!("{e}")))?;
    let tree = parser
        .parse(source.as_bytes(), None)
        .ok_or(ParseError::ParseFailed)?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(ParseError::Syntax {
            line: first_error_line(root).unwrap_or(1),
        });
    }

    let bytes = source.as_bytes();
    let index = build_callable_index(root, bytes);
    Ok(ModuleDecls {
        decls: collect_decls(root, bytes, &index),
    })
}

fn first_error_line(node: Node<'_>) -> Option<u32> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row as u32 + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(line) = first_error_line(child) {
            return Some(line);
        }
    }
    None
}

fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Map from name to parameter list for every function (or name bound to a
/// lambda) defined anywhere in the module. First definition wins.
fn build_callable_index(root: Node<'_>, source: &[u8]) -> HashMap<String, Vec<String>> {
    let mut index = HashMap::new();
    index_callables(root, source, &mut index);
    index
}

fn index_callables(node: Node<'_>, source: &[u8], index: &mut HashMap<String, Vec<String>>) {
    match node.kind() {
        "function_definition" => {
            if let Some(name) = node.child_by_field_name("name") {
                let params = node
                    .child_by_field_name("parameters")
                    .map(|p| param_names(p, source))
                    .unwrap_or_default();
                index
                    .entry(node_text(name, source).to_string())
                    .or_insert(params);
            }
        }
        "assignment" => {
            // `check = lambda x: ...` binds a callable to a plain name
            if let (Some(left), Some(right)) = (
                node.child_by_field_name("left"),
                node.child_by_field_name("right"),
            ) {
                if left.kind() == "identifier" && right.kind() == "lambda" {
                    let params = right
                        .child_by_field_name("parameters")
                        .map(|p| param_names(p, source))
                        .unwrap_or_default();
                    index
                        .entry(node_text(left, source).to_string())
                        .or_insert(params);
                }
            }
        }
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        index_callables(child, source, index);
    }
}

/// Extract parameter names from a `parameters` or `lambda_parameters` node.
/// Bare `*` and `/` separators are not parameters; `*args`/`**kwargs` keep
/// their plain names.
fn param_names(params: Node<'_>, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = params.walk();
    for child in params.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => names.push(node_text(child, source).to_string()),
            "typed_parameter" => {
                if let Some(name) = first_identifier(child, source) {
                    names.push(name);
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = child.child_by_field_name("name") {
                    names.push(node_text(name, source).to_string());
                }
            }
            "list_splat_pattern" | "dictionary_splat_pattern" => {
                if let Some(name) = first_identifier(child, source) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }
    names
}

fn first_identifier(node: Node<'_>, source: &[u8]) -> Option<String> {
    if node.kind() == "identifier" {
        return Some(node_text(node, source).to_string());
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(name) = first_identifier(child, source) {
            return Some(name);
        }
    }
    None
}

/// Walk a subtree and collect function/class declarations in source order.
/// Descends through any other statement (conditionals, try blocks, ...) so
/// nested declarations are found wherever they live.
fn collect_decls(node: Node<'_>, source: &[u8], index: &HashMap<String, Vec<String>>) -> Vec<Decl> {
    let mut decls = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "decorated_definition" => {
                let decorations = parse_decorations(child, source, index);
                let line = child.start_position().row as u32 + 1;
                if let Some(def) = child.child_by_field_name("definition") {
                    match def.kind() {
                        "function_definition" => {
                            decls.push(Decl::Function(build_function(
                                def,
                                line,
                                decorations,
                                source,
                                index,
                            )));
                        }
                        "class_definition" => {
                            decls.push(Decl::Class(build_class(
                                def,
                                line,
                                decorations,
                                source,
                                index,
                            )));
                        }
                        _ => {}
                    }
                }
            }
            "function_definition" => {
                let line = child.start_position().row as u32 + 1;
                decls.push(Decl::Function(build_function(
                    child,
                    line,
                    Vec::new(),
                    source,
                    index,
                )));
            }
            "class_definition" => {
                let line = child.start_position().row as u32 + 1;
                decls.push(Decl::Class(build_class(
                    child,
                    line,
                    Vec::new(),
                    source,
                    index,
                )));
            }
            _ => decls.extend(collect_decls(child, source, index)),
        }
    }
    decls
}

fn build_function(
    def: Node<'_>,
    line: u32,
    decorations: Vec<Decoration>,
    source: &[u8],
    index: &HashMap<String, Vec<String>>,
) -> FunctionDecl {
    let name = def
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();
    let params = def
        .child_by_field_name("parameters")
        .map(|p| param_names(p, source))
        .unwrap_or_default();
    // Optimistically assume the function returns a value; false only for an
    // explicit `-> None` annotation.
    let returns_value = def
        .child_by_field_name("return_type")
        .map(|r| node_text(r, source).trim() != "None")
        .unwrap_or(true);
    let nested = def
        .child_by_field_name("body")
        .map(|b| collect_decls(b, source, index))
        .unwrap_or_default();

    FunctionDecl {
        name,
        line,
        params,
        returns_value,
        decorations,
        nested,
    }
}

fn build_class(
    def: Node<'_>,
    line: u32,
    decorations: Vec<Decoration>,
    source: &[u8],
    index: &HashMap<String, Vec<String>>,
) -> ClassDecl {
    let name = def
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();
    let body = def
        .child_by_field_name("body")
        .map(|b| collect_decls(b, source, index))
        .unwrap_or_default();

    ClassDecl {
        name,
        line,
        decorations,
        body,
    }
}

fn parse_decorations(
    decorated: Node<'_>,
    source: &[u8],
    index: &HashMap<String, Vec<String>>,
) -> Vec<Decoration> {
    let mut decorations = Vec::new();
    let mut cursor = decorated.walk();
    for child in decorated.children(&mut cursor) {
        if child.kind() == "decorator" {
            decorations.push(parse_decoration(child, source, index));
        }
    }
    decorations
}

fn parse_decoration(
    decorator: Node<'_>,
    source: &[u8],
    index: &HashMap<String, Vec<String>>,
) -> Decoration {
    let line = decorator.start_position().row as u32 + 1;
    let mut decoration = Decoration {
        line,
        capability: None,
        positional: Vec::new(),
        keywords: Vec::new(),
    };

    // Only called decorators register contracts; a bare `@require` is not a
    // contract registration.
    let Some(expr) = decorator.named_child(0) else {
        return decoration;
    };
    if expr.kind() != "call" {
        return decoration;
    }
    let Some(callee) = expr.child_by_field_name("function") else {
        return decoration;
    };
    let Some(capability) = capability_of(callee, source) else {
        return decoration;
    };
    decoration.capability = Some(capability);

    if let Some(args) = expr.child_by_field_name("arguments") {
        let mut cursor = args.walk();
        for arg in args.named_children(&mut cursor) {
            if arg.kind() == "keyword_argument" {
                let name = arg
                    .child_by_field_name("name")
                    .map(|n| node_text(n, source).to_string())
                    .unwrap_or_default();
                let value = arg
                    .child_by_field_name("value")
                    .map(|v| resolve_value(v, source, index))
                    .unwrap_or(ValueRef::Unresolved);
                decoration.keywords.push((name, value));
            } else if arg.kind() != "comment" {
                decoration.positional.push(resolve_value(arg, source, index));
            }
        }
    }

    decoration
}

/// Recognize the contract capability of a decorator callee: a bare name or a
/// dotted path ending in `require`, `ensure`, `snapshot`, or `invariant`.
fn capability_of(callee: Node<'_>, source: &[u8]) -> Option<ContractKind> {
    let name = match callee.kind() {
        "identifier" => node_text(callee, source),
        "attribute" => callee
            .child_by_field_name("attribute")
            .map(|a| node_text(a, source))
            .unwrap_or(""),
        _ => return None,
    };
    match name {
        "require" => Some(ContractKind::Precondition),
        "ensure" => Some(ContractKind::Postcondition),
        "snapshot" => Some(ContractKind::Snapshot),
        "invariant" => Some(ContractKind::Invariant),
        _ => None,
    }
}

fn resolve_value(
    node: Node<'_>,
    source: &[u8],
    index: &HashMap<String, Vec<String>>,
) -> ValueRef {
    match node.kind() {
        "lambda" => {
            let params = node
                .child_by_field_name("parameters")
                .map(|p| param_names(p, source))
                .unwrap_or_default();
            ValueRef::Callable { params }
        }
        "identifier" => {
            let name = node_text(node, source);
            match index.get(name) {
                Some(params) => ValueRef::Callable {
                    params: params.clone(),
                },
                None => ValueRef::Unresolved,
            }
        }
        "string" => {
            let mut cursor = node.walk();
            let content = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "string_content")
                .map(|c| node_text(c, source).to_string())
                .unwrap_or_default();
            ValueRef::Literal(content)
        }
        "integer" | "float" | "true" | "false" | "none" => {
            ValueRef::Literal(node_text(node, source).to_string())
        }
        _ => ValueRef::Unresolved,
    }
}
