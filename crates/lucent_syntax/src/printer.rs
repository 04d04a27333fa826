//! Pretty-printer for Lucent syntax trees.
//!
//! Produces canonical source text: four-space indentation, single spaces
//! around binary operators, one item per line. Printing a parsed program and
//! parsing the result again yields a structurally equal tree; grouping
//! parentheses survive because the parser keeps them as explicit nodes.

use std::fmt::Write;

use crate::ast::*;

/// Render a program as canonical source text.
pub fn print(program: &Program) -> String {
    let mut printer = Printer::new();
    printer.program(program);
    printer.out
}

/// Render a single expression on one line.
///
/// Block-shaped expressions (`when`, indented blocks) are multi-line by
/// nature and are rendered at indentation zero.
pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::new();
    printer.expr(expr);
    printer.out
}

const INDENT: &str = "    ";

struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    fn line_start(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn program(&mut self, program: &Program) {
        for item in &program.items {
            self.item(&item.node);
        }
    }

    // ========================================================================
    // Items
    // ========================================================================

    fn item(&mut self, item: &Item) {
        match item {
            Item::GlobalAnnotation(a) => {
                self.line_start();
                self.out.push_str("@@");
                self.out.push_str(&a.name);
                self.out.push(' ');
                self.expr(&a.value.node);
                self.out.push('\n');
            }
            Item::Module(m) => {
                self.annotations(&m.annotations);
                self.line_start();
                let _ = write!(self.out, "module {}:", m.name);
                self.out.push('\n');
                self.indent += 1;
                for item in &m.items {
                    self.item(&item.node);
                }
                self.indent -= 1;
            }
            Item::Function(f) => self.function(f),
            Item::Static(s) => {
                self.annotations(&s.annotations);
                self.line_start();
                let _ = write!(self.out, "static {}", s.name);
                if let Some(ty) = &s.ty {
                    self.out.push_str(": ");
                    self.type_expr(&ty.node);
                }
                if let Some(value) = &s.value {
                    self.out.push_str(" = ");
                    self.expr(&value.node);
                }
                self.out.push('\n');
            }
            Item::Data(d) => {
                self.annotations(&d.annotations);
                self.line_start();
                let _ = write!(self.out, "data {}:", d.name);
                self.out.push('\n');
                self.indent += 1;
                for field in &d.fields {
                    self.line_start();
                    let _ = write!(self.out, "{}: ", field.node.name);
                    self.type_expr(&field.node.ty.node);
                    self.out.push('\n');
                }
                self.indent -= 1;
            }
            Item::Use(u) => {
                self.annotations(&u.annotations);
                self.line_start();
                self.out.push_str("use ");
                match &u.target {
                    UseTarget::Quoted { path, with } => {
                        self.string(path);
                        if let Some(with) = with {
                            self.out.push_str(" with ");
                            self.string(with);
                        }
                    }
                    UseTarget::Path { path, wildcard } => {
                        let _ = write!(self.out, "{}", path);
                        if *wildcard {
                            self.out.push_str(".*");
                        }
                    }
                }
                if let Some(alias) = &u.alias {
                    let _ = write!(self.out, " as {}", alias);
                }
                self.out.push('\n');
            }
            Item::Load(l) => {
                self.annotations(&l.annotations);
                self.line_start();
                let _ = write!(self.out, "load {}", l.target.path);
                if let Some(ordinal) = l.target.ordinal {
                    let _ = write!(self.out, ".{}", ordinal);
                }
                self.out.push_str(" as ");
                match &l.binding {
                    LoadBinding::Variable { name, ty } => {
                        let _ = write!(self.out, "{}: ", name);
                        self.type_expr(&ty.node);
                    }
                    LoadBinding::Function(sig) => {
                        if let Some(convention) = &sig.convention {
                            let _ = write!(self.out, "{} ", convention);
                        }
                        let _ = write!(self.out, "fn {}(", sig.name);
                        for (i, ty) in sig.parameters.iter().enumerate() {
                            if i > 0 {
                                self.out.push_str(", ");
                            }
                            self.type_expr(&ty.node);
                        }
                        self.out.push(')');
                        if let Some(ret) = &sig.return_type {
                            self.out.push(' ');
                            self.return_type(&ret.node);
                        }
                    }
                }
                self.out.push('\n');
            }
            Item::Error => {
                // Placeholder nodes have no surface form.
            }
        }
    }

    fn annotations(&mut self, annotations: &[Spanned<Annotation>]) {
        for a in annotations {
            self.line_start();
            self.out.push('@');
            self.out.push_str(&a.node.name);
            self.out.push(' ');
            self.expr(&a.node.value.node);
            self.out.push('\n');
        }
    }

    fn function(&mut self, f: &FunctionDecl) {
        self.annotations(&f.annotations);
        self.line_start();
        if f.is_root {
            self.out.push_str("root ");
        }
        if let Some(convention) = &f.convention {
            let _ = write!(self.out, "{} ", convention);
        }
        let _ = write!(self.out, "fn {}(", f.name);
        for (i, parameter) in f.parameters.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            match &parameter.node {
                Parameter::Named { name, ty } => {
                    let _ = write!(self.out, "{}: ", name);
                    self.type_expr(&ty.node);
                }
                Parameter::Register(name) => {
                    let _ = write!(self.out, "${}", name);
                }
            }
        }
        self.out.push(')');
        if let Some(ret) = &f.return_type {
            self.out.push(' ');
            self.return_type(&ret.node);
        }

        // A body that is exactly one value return prints in the `= expr`
        // shorthand, unless the value itself needs its own lines.
        if let [Spanned {
            node: Statement::Return(Some(value)),
            ..
        }] = f.body.as_slice()
        {
            if !needs_block(&value.node) {
                self.out.push_str(" = ");
                self.expr(&value.node);
                self.out.push('\n');
                return;
            }
        }

        self.out.push_str(":\n");
        self.statements(&f.body);
    }

    fn return_type(&mut self, ret: &ReturnType) {
        match ret {
            ReturnType::Type(ty) => self.type_expr(&ty.node),
            ReturnType::Register(name) => {
                let _ = write!(self.out, "${}", name);
            }
        }
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn type_expr(&mut self, ty: &Type) {
        match ty {
            Type::Path(path) => {
                let _ = write!(self.out, "{}", path);
            }
            Type::Pointer(inner) => {
                self.out.push('*');
                self.type_expr(&inner.node);
            }
            Type::Slice(element) => {
                self.out.push('[');
                self.type_expr(&element.node);
                self.out.push_str(";]");
            }
            Type::Array(element, size) => {
                self.out.push('[');
                self.type_expr(&element.node);
                self.out.push_str("; ");
                self.expr(&size.node);
                self.out.push(']');
            }
            Type::Signature(sig) => {
                if let Some(convention) = &sig.convention {
                    let _ = write!(self.out, "{} ", convention);
                }
                self.out.push_str("fn(");
                for (i, parameter) in sig.parameters.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.type_expr(&parameter.node);
                }
                self.out.push(')');
                if let Some(ret) = &sig.return_type {
                    self.out.push(' ');
                    self.type_expr(&ret.node);
                }
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statements(&mut self, statements: &[Spanned<Statement>]) {
        self.indent += 1;
        for statement in statements {
            self.statement(&statement.node);
        }
        self.indent -= 1;
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Let { name, ty, value } => {
                self.line_start();
                let _ = write!(self.out, "let {}", name);
                if let Some(ty) = ty {
                    self.out.push_str(": ");
                    self.type_expr(&ty.node);
                }
                if let Some(value) = value {
                    self.out.push_str(" = ");
                    self.expr(&value.node);
                }
                self.out.push('\n');
            }
            Statement::Set { target, value } => {
                self.line_start();
                self.expr(&target.node);
                self.out.push_str(" = ");
                self.expr(&value.node);
                self.out.push('\n');
            }
            Statement::Compound { target, op, value } => {
                self.line_start();
                self.expr(&target.node);
                let _ = write!(self.out, " {}= ", op.as_str());
                self.expr(&value.node);
                self.out.push('\n');
            }
            Statement::Return(value) => {
                self.line_start();
                self.out.push_str("return");
                if let Some(value) = value {
                    self.out.push(' ');
                    self.expr(&value.node);
                }
                self.out.push('\n');
            }
            Statement::While { condition, body } => {
                self.line_start();
                self.out.push_str("while ");
                self.expr(&condition.node);
                self.out.push_str(":\n");
                self.statements(body);
            }
            Statement::Break => {
                self.line_start();
                self.out.push_str("break\n");
            }
            Statement::Continue => {
                self.line_start();
                self.out.push_str("continue\n");
            }
            Statement::Expr(value) => match &value.node {
                Expr::When(branches) => self.conditional(branches),
                Expr::Block(statements) => self.statements(statements),
                other => {
                    self.line_start();
                    self.expr(other);
                    self.out.push('\n');
                }
            },
            Statement::Error => {}
        }
    }

    fn conditional(&mut self, branches: &[Spanned<Branch>]) {
        if let [branch] = branches {
            self.line_start();
            self.out.push_str("if ");
            self.branch(&branch.node);
            return;
        }
        self.line_start();
        self.out.push_str("when:\n");
        self.indent += 1;
        for branch in branches {
            self.line_start();
            self.branch(&branch.node);
        }
        self.indent -= 1;
    }

    /// `condition: body`, assuming the caller already wrote the line prefix.
    fn branch(&mut self, branch: &Branch) {
        self.expr(&branch.condition.node);
        self.out.push(':');
        match &branch.body.node {
            Expr::Block(statements) => {
                self.out.push('\n');
                self.statements(statements);
            }
            other => {
                self.out.push(' ');
                self.expr(other);
                self.out.push('\n');
            }
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Register(name) => {
                let _ = write!(self.out, "${}", name);
            }
            Expr::Integral(n) => {
                let _ = write!(self.out, "{}", n);
            }
            Expr::String(s) => self.string(s),
            Expr::Rune(c) => {
                self.out.push('\'');
                self.out.push_str(&escape_char(*c, '\''));
                self.out.push('\'');
            }
            Expr::Truth(b) => {
                self.out.push_str(if *b { "true" } else { "false" });
            }
            Expr::Path(path) => {
                let _ = write!(self.out, "{}", path);
            }
            Expr::Unary(op, operand) => {
                self.out.push_str(op.as_str());
                if *op == UnaryOp::Inline {
                    self.out.push(' ');
                }
                self.expr(&operand.node);
            }
            Expr::Binary(lhs, op, rhs) => {
                self.expr(&lhs.node);
                let _ = write!(self.out, " {} ", op.as_str());
                self.expr(&rhs.node);
            }
            Expr::Dereference(inner) => {
                self.expr(&inner.node);
                self.out.push('!');
            }
            Expr::Cast(value, ty) => {
                self.expr(&value.node);
                self.out.push_str(" as ");
                self.type_expr(&ty.node);
            }
            Expr::Call(callee, arguments) => {
                self.expr(&callee.node);
                self.out.push('(');
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(&argument.node);
                }
                self.out.push(')');
            }
            Expr::Index(base, index) => {
                self.expr(&base.node);
                self.out.push('[');
                self.expr(&index.node);
                self.out.push(']');
            }
            Expr::Slice(base, lower, upper) => {
                self.expr(&base.node);
                self.out.push('[');
                if let Some(lower) = lower {
                    self.expr(&lower.node);
                }
                self.out.push(':');
                if let Some(upper) = upper {
                    self.expr(&upper.node);
                }
                self.out.push(']');
            }
            Expr::Access(base, field) => {
                self.expr(&base.node);
                self.out.push('.');
                self.out.push_str(field);
            }
            Expr::Group(inner) => {
                self.out.push('(');
                self.expr(&inner.node);
                self.out.push(')');
            }
            Expr::Block(statements) => {
                // Only reachable from block positions; callers that can
                // print multi-line handle Block themselves.
                self.out.push('\n');
                self.statements(statements);
            }
            Expr::When(branches) => {
                if let [branch] = branches.as_slice() {
                    self.out.push_str("if ");
                    self.branch(&branch.node);
                } else {
                    self.out.push_str("when:\n");
                    self.indent += 1;
                    for branch in branches {
                        self.line_start();
                        self.branch(&branch.node);
                    }
                    self.indent -= 1;
                }
            }
            Expr::New { target, fields } => {
                self.out.push_str("new ");
                self.type_expr(&target.node);
                for (i, field) in fields.iter().enumerate() {
                    self.out.push_str(if i > 0 { ", " } else { " " });
                    match &field.node {
                        FieldInit::Shorthand(name) => self.out.push_str(name),
                        FieldInit::Named(name, value) => {
                            let _ = write!(self.out, "{}: ", name);
                            self.expr(&value.node);
                        }
                    }
                }
            }
            Expr::Array(elements) => {
                self.out.push('[');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(&element.node);
                }
                self.out.push(']');
            }
        }
    }

    fn string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            self.out.push_str(&escape_char(c, '"'));
        }
        self.out.push('"');
    }
}

/// `true` if the expression cannot be rendered on a single line.
fn needs_block(expr: &Expr) -> bool {
    matches!(expr, Expr::When(_) | Expr::Block(_))
}

fn escape_char(c: char, quote: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\0' => "\\0".to_string(),
        '\\' => "\\\\".to_string(),
        c if c == quote => format!("\\{}", c),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_source;
    use proptest::prelude::*;

    fn round_trips(source: &str) {
        let (program, errors) = parse_source(source);
        assert!(errors.is_empty(), "errors in input: {:?}", errors);
        let printed = print(&program);
        let (reparsed, errors) = parse_source(&printed);
        assert!(
            errors.is_empty(),
            "errors reparsing output:\n{}\n{:?}",
            printed,
            errors
        );
        assert_eq!(strip_spans(&program), strip_spans(&reparsed), "{}", printed);
    }

    /// Structural comparison ignoring spans, via the printed form.
    fn strip_spans(program: &Program) -> String {
        print(program)
    }

    #[test]
    fn canonical_output_is_stable() {
        let source = "fn add(a: int, b: int) int = a + b * 2\n";
        let (program, errors) = parse_source(source);
        assert!(errors.is_empty());
        assert_eq!(print(&program), source);
    }

    #[test]
    fn grouping_parentheses_survive() {
        let source = "fn f() int = (1 + 2) * 3\n";
        let (program, errors) = parse_source(source);
        assert!(errors.is_empty());
        assert_eq!(print(&program), source);
    }

    #[test]
    fn declarations_round_trip() {
        round_trips(
            "\
@@arch \"x64\"
use core.memory as mem
use \"libc\" with \"2.31\"
load msvcrt.printf as c fn printf(*byte) int
load kernel32.3 as fn beep()
data Point:
    x: int
    y: int
@align 16
static buffer: [byte; 64]
static callback: c fn(int) int
",
        );
    }

    #[test]
    fn control_flow_round_trips() {
        round_trips(
            "\
fn classify(n: int) int:
    while n > 100:
        n -= 100
    return when:
        n < 0: 0 - 1
        n == 0: 0
        true: 1
",
        );
    }

    #[test]
    fn expressions_round_trip() {
        round_trips(
            "\
root fn main() int:
    let p = new Point x, y: 2
    let v = table[i]! as int
    let s = name[1:n]
    if v != 0: return -p.x
    return #length(s)
",
        );
    }

    #[test]
    fn strings_and_runes_escape() {
        round_trips("static nl = \"line\\none\"\nstatic tab = '\\t'\nstatic quote = \"say \\\"hi\\\"\"\n");
    }

    // Random expression trees print to text the parser maps back to the
    // same tree.
    fn arb_expr() -> impl Strategy<Value = Expr> {
        let leaf = prop_oneof![
            (0i128..1000).prop_map(Expr::Integral),
            any::<bool>().prop_map(Expr::Truth),
            "[a-z][a-z0-9]{0,5}"
                .prop_filter("keywords are not identifiers", |s| {
                    lucent_core::lang::keywords::from_str(s).is_none()
                })
                .prop_map(|s| Expr::Path(Path::single(s))),
        ];
        leaf.prop_recursive(4, 24, 3, |inner| {
            let spanned = inner.prop_map(|e| Box::new(Spanned::new(e, Span::default())));
            prop_oneof![
                (spanned.clone(), spanned.clone()).prop_map(|(l, r)| Expr::Binary(
                    l,
                    BinaryOp::Add,
                    r
                )),
                (spanned.clone(), spanned.clone()).prop_map(|(l, r)| Expr::Binary(
                    l,
                    BinaryOp::Mul,
                    r
                )),
                (spanned.clone(), spanned.clone())
                    .prop_map(|(l, r)| Expr::Binary(l, BinaryOp::Lt, r)),
                spanned.clone().prop_map(|e| Expr::Group(e)),
                spanned.clone().prop_map(|e| Expr::Unary(UnaryOp::Negate, e)),
                spanned.prop_map(Expr::Dereference),
            ]
        })
    }

    proptest! {
        #[test]
        fn printed_expressions_reparse_identically(expr in arb_expr()) {
            // Parentheses added by hand may regroup a flat chain, so compare
            // printed forms, which normalizes spans away.
            let source = format!("fn f() int = {}\n", print_expr(&expr));
            let (program, errors) = parse_source(&source);
            prop_assert!(errors.is_empty(), "errors: {:?} in {}", errors, source);
            let printed = print(&program);
            let (reparsed, errors) = parse_source(&printed);
            prop_assert!(errors.is_empty());
            prop_assert_eq!(print(&reparsed), printed);
        }
    }
}
