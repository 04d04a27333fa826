#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_ok(source: &str) -> Program {
        let (tokens, lex_errors) = lexer::lex(source);
        assert!(lex_errors.is_empty(), "lex errors: {:?}", lex_errors);
        let (program, errors) = parse(&tokens);
        assert!(errors.is_empty(), "parse errors: {:?}", errors);
        program
    }

    fn parse_with_errors(source: &str) -> (Program, Vec<CompileError>) {
        let (tokens, _) = lexer::lex(source);
        parse(&tokens)
    }

    fn only_function(program: &Program) -> &FunctionDecl {
        assert_eq!(program.items.len(), 1);
        match &program.items[0].node {
            Item::Function(f) => f,
            other => panic!("expected a function, got {:?}", other),
        }
    }

    fn expr_statement(statement: &Statement) -> &Spanned<Expr> {
        match statement {
            Statement::Expr(e) => e,
            other => panic!("expected an expression statement, got {:?}", other),
        }
    }

    #[test]
    fn function_with_parameters_and_return_type() {
        let program = parse_ok("fn add(a: int, b: int) int:\n    return a + b\n");
        let f = only_function(&program);
        assert_eq!(f.name, "add");
        assert_eq!(f.parameters.len(), 2);
        assert!(matches!(
            f.return_type,
            Some(Spanned {
                node: ReturnType::Type(_),
                ..
            })
        ));
        assert_eq!(f.body.len(), 1);
    }

    #[test]
    fn expression_body_desugars_to_return() {
        let program = parse_ok("fn answer() int = 42\n");
        let f = only_function(&program);
        assert_eq!(f.body.len(), 1);
        match &f.body[0].node {
            Statement::Return(Some(value)) => {
                assert_eq!(value.node, Expr::Integral(42));
            }
            other => panic!("expected a return, got {:?}", other),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let program = parse_ok("fn f() int = 1 + 2 * 3\n");
        let f = only_function(&program);
        let Statement::Return(Some(value)) = &f.body[0].node else {
            panic!("expected a return");
        };
        let Expr::Binary(lhs, BinaryOp::Add, rhs) = &value.node else {
            panic!("expected addition at the root, got {:?}", value.node);
        };
        assert_eq!(lhs.node, Expr::Integral(1));
        assert!(matches!(rhs.node, Expr::Binary(_, BinaryOp::Mul, _)));
    }

    #[test]
    fn shift_binds_tighter_than_bitwise_or() {
        let program = parse_ok("fn f() int = x << 1 | y\n");
        let f = only_function(&program);
        let Statement::Return(Some(value)) = &f.body[0].node else {
            panic!("expected a return");
        };
        let Expr::Binary(lhs, BinaryOp::BitOr, _) = &value.node else {
            panic!("expected bitwise-or at the root, got {:?}", value.node);
        };
        assert!(matches!(lhs.node, Expr::Binary(_, BinaryOp::Shl, _)));
    }

    #[test]
    fn subtraction_associates_left() {
        let program = parse_ok("fn f() int = 10 - 3 - 2\n");
        let f = only_function(&program);
        let Statement::Return(Some(value)) = &f.body[0].node else {
            panic!("expected a return");
        };
        let Expr::Binary(lhs, BinaryOp::Sub, rhs) = &value.node else {
            panic!("expected subtraction at the root");
        };
        assert!(matches!(lhs.node, Expr::Binary(_, BinaryOp::Sub, _)));
        assert_eq!(rhs.node, Expr::Integral(2));
    }

    #[test]
    fn negation_applies_to_the_whole_projection() {
        // -a.b negates the projected field, not `a`.
        let program = parse_ok("fn f() int = -a.b\n");
        let f = only_function(&program);
        let Statement::Return(Some(value)) = &f.body[0].node else {
            panic!("expected a return");
        };
        let Expr::Unary(UnaryOp::Negate, operand) = &value.node else {
            panic!("expected negation at the root, got {:?}", value.node);
        };
        assert!(matches!(operand.node, Expr::Access(_, _)));
    }

    #[test]
    fn inline_module_nesting_on_one_line() {
        let program = parse_ok("module A: module B: fn f() = 0\n");
        let Item::Module(a) = &program.items[0].node else {
            panic!("expected a module");
        };
        assert_eq!(a.name, "A");
        assert_eq!(a.items.len(), 1);
        let Item::Module(b) = &a.items[0].node else {
            panic!("expected a nested module");
        };
        assert_eq!(b.name, "B");
        assert!(matches!(b.items[0].node, Item::Function(_)));
    }

    #[test]
    fn indented_module_block() {
        let source = "module m:\n    fn a() = 1\n    fn b() = 2\n";
        let program = parse_ok(source);
        let Item::Module(m) = &program.items[0].node else {
            panic!("expected a module");
        };
        assert_eq!(m.items.len(), 2);
    }

    #[test]
    fn compound_assignment_statement() {
        let program = parse_ok("fn f():\n    x += 1\n    x <<= 2\n");
        let f = only_function(&program);
        assert!(matches!(
            f.body[0].node,
            Statement::Compound {
                op: BinaryOp::Add,
                ..
            }
        ));
        assert!(matches!(
            f.body[1].node,
            Statement::Compound {
                op: BinaryOp::Shl,
                ..
            }
        ));
    }

    #[test]
    fn compound_assignment_through_dereference() {
        let program = parse_ok("fn f(p: *int):\n    p! += 1\n");
        let f = only_function(&program);
        let Statement::Compound { target, op, .. } = &f.body[0].node else {
            panic!("expected a compound assignment, got {:?}", f.body[0].node);
        };
        assert!(matches!(target.node, Expr::Dereference(_)));
        assert_eq!(*op, BinaryOp::Add);
    }

    #[test]
    fn assignment_through_dereference() {
        let program = parse_ok("fn f(p: *int):\n    p! = 5\n");
        let f = only_function(&program);
        let Statement::Set { target, value } = &f.body[0].node else {
            panic!("expected an assignment, got {:?}", f.body[0].node);
        };
        assert!(matches!(target.node, Expr::Dereference(_)));
        assert_eq!(value.node, Expr::Integral(5));
    }

    #[test]
    fn postfix_dereference_then_cast() {
        let program = parse_ok("fn f(p: *byte) int = p! as int\n");
        let f = only_function(&program);
        let Statement::Return(Some(value)) = &f.body[0].node else {
            panic!("expected a return");
        };
        let Expr::Cast(inner, _) = &value.node else {
            panic!("expected a cast, got {:?}", value.node);
        };
        assert!(matches!(inner.node, Expr::Dereference(_)));
    }

    #[test]
    fn when_with_multiple_branches() {
        let source = "\
fn classify(n: int) int:
    return when:
        n < 0: 0 - 1
        n == 0: 0
        true: 1
";
        let program = parse_ok(source);
        let f = only_function(&program);
        let Statement::Return(Some(value)) = &f.body[0].node else {
            panic!("expected a return");
        };
        let Expr::When(branches) = &value.node else {
            panic!("expected a conditional, got {:?}", value.node);
        };
        assert_eq!(branches.len(), 3);
        assert_eq!(branches[2].node.condition.node, Expr::Truth(true));
    }

    #[test]
    fn if_is_a_single_branch_conditional() {
        let program = parse_ok("fn f(x: int):\n    if x > 0: x = 0\n");
        let f = only_function(&program);
        let value = expr_statement(&f.body[0].node);
        let Expr::When(branches) = &value.node else {
            panic!("expected a conditional");
        };
        assert_eq!(branches.len(), 1);
        assert!(matches!(branches[0].node.body.node, Expr::Block(_)));
    }

    #[test]
    fn branch_body_may_be_an_indented_block() {
        let source = "\
fn f(x: int):
    if x > 0:
        x = 1
        x = 2
";
        let program = parse_ok(source);
        let f = only_function(&program);
        let value = expr_statement(&f.body[0].node);
        let Expr::When(branches) = &value.node else {
            panic!("expected a conditional");
        };
        let Expr::Block(statements) = &branches[0].node.body.node else {
            panic!("expected a block body");
        };
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn while_loop_with_break_and_continue() {
        let source = "\
fn f():
    while true:
        if done: break
        continue
";
        let program = parse_ok(source);
        let f = only_function(&program);
        let Statement::While { body, .. } = &f.body[0].node else {
            panic!("expected a while loop");
        };
        assert_eq!(body.len(), 2);
        assert!(matches!(body[1].node, Statement::Continue));
    }

    #[test]
    fn register_parameters_and_return() {
        let program = parse_ok("fn exit($rdi) $rax:\n    return 60\n");
        let f = only_function(&program);
        assert!(matches!(
            f.parameters[0].node,
            Parameter::Register(ref r) if r == "rdi"
        ));
        assert!(matches!(
            f.return_type,
            Some(Spanned {
                node: ReturnType::Register(ref r),
                ..
            }) if r == "rax"
        ));
    }

    #[test]
    fn root_and_convention_markers() {
        let program = parse_ok("root fn main() = 0\n");
        assert!(only_function(&program).is_root);

        let program = parse_ok("systemv fn handler() = 0\n");
        let f = only_function(&program);
        assert_eq!(f.convention.as_deref(), Some("systemv"));
    }

    #[test]
    fn data_declaration_with_indented_fields() {
        let source = "data Point:\n    x: int\n    y: int\n";
        let program = parse_ok(source);
        let Item::Data(d) = &program.items[0].node else {
            panic!("expected a data declaration");
        };
        assert_eq!(d.name, "Point");
        assert_eq!(d.fields.len(), 2);
        assert_eq!(d.fields[0].node.name, "x");
    }

    #[test]
    fn static_requires_type_or_value() {
        let program = parse_ok("static counter: int\nstatic greeting = \"hi\"\n");
        assert_eq!(program.items.len(), 2);

        let (program, errors) = parse_with_errors("static bare\n");
        assert_eq!(errors.len(), 1);
        assert!(matches!(program.items[0].node, Item::Error));
    }

    #[test]
    fn use_forms() {
        let source = "\
use core.memory as mem
use core.prelude.*
use \"libc\" with \"2.31\"
";
        let program = parse_ok(source);
        assert_eq!(program.items.len(), 3);

        let Item::Use(first) = &program.items[0].node else {
            panic!("expected a use");
        };
        assert_eq!(first.alias.as_deref(), Some("mem"));

        let Item::Use(second) = &program.items[1].node else {
            panic!("expected a use");
        };
        assert!(matches!(
            second.target,
            UseTarget::Path { wildcard: true, .. }
        ));

        let Item::Use(third) = &program.items[2].node else {
            panic!("expected a use");
        };
        assert!(matches!(
            third.target,
            UseTarget::Quoted { with: Some(_), .. }
        ));
    }

    #[test]
    fn load_variable_and_signature_bindings() {
        let source = "\
load libc.errno as errno_value: int
load msvcrt.printf as c fn printf(*byte) int
load kernel32.3 as fn beep()
";
        let program = parse_ok(source);
        assert_eq!(program.items.len(), 3);

        let Item::Load(first) = &program.items[0].node else {
            panic!("expected a load");
        };
        assert!(matches!(first.binding, LoadBinding::Variable { .. }));

        let Item::Load(second) = &program.items[1].node else {
            panic!("expected a load");
        };
        let LoadBinding::Function(sig) = &second.binding else {
            panic!("expected a function binding");
        };
        assert_eq!(sig.convention.as_deref(), Some("c"));
        assert_eq!(sig.parameters.len(), 1);

        let Item::Load(third) = &program.items[2].node else {
            panic!("expected a load");
        };
        assert_eq!(third.target.ordinal, Some(3));
    }

    #[test]
    fn annotations_attach_in_source_order() {
        let source = "@align 16\n@section \"text\"\nstatic buffer: [byte; 64]\n";
        let program = parse_ok(source);
        let Item::Static(s) = &program.items[0].node else {
            panic!("expected a static");
        };
        assert_eq!(s.annotations.len(), 2);
        assert_eq!(s.annotations[0].node.name, "align");
        assert_eq!(s.annotations[1].node.name, "section");
    }

    #[test]
    fn global_annotation_is_its_own_item() {
        let program = parse_ok("@@arch \"x64\"\nfn main() = 0\n");
        assert_eq!(program.items.len(), 2);
        let Item::GlobalAnnotation(a) = &program.items[0].node else {
            panic!("expected a global annotation");
        };
        assert_eq!(a.name, "arch");
    }

    #[test]
    fn new_expression_with_shorthand_and_named_fields() {
        let program = parse_ok("fn f(x: int) Point = new Point x, y: 2\n");
        let f = only_function(&program);
        let Statement::Return(Some(value)) = &f.body[0].node else {
            panic!("expected a return");
        };
        let Expr::New { fields, .. } = &value.node else {
            panic!("expected a construction, got {:?}", value.node);
        };
        assert_eq!(fields.len(), 2);
        assert!(matches!(fields[0].node, FieldInit::Shorthand(_)));
        assert!(matches!(fields[1].node, FieldInit::Named(_, _)));
    }

    #[test]
    fn index_and_slice_postfix() {
        let program = parse_ok("fn f(s: [byte;]):\n    let a = s[0]\n    let b = s[1:4]\n    let c = s[:n]\n");
        let f = only_function(&program);
        let Statement::Let { value: Some(a), .. } = &f.body[0].node else {
            panic!("expected a let");
        };
        assert!(matches!(a.node, Expr::Index(_, _)));
        let Statement::Let { value: Some(b), .. } = &f.body[1].node else {
            panic!("expected a let");
        };
        assert!(matches!(b.node, Expr::Slice(_, Some(_), Some(_))));
        let Statement::Let { value: Some(c), .. } = &f.body[2].node else {
            panic!("expected a let");
        };
        assert!(matches!(c.node, Expr::Slice(_, None, Some(_))));
    }

    #[test]
    fn pointer_slice_and_array_types() {
        let source = "\
fn f(p: *int, s: [byte;], buf: [byte; 16]):
    return
";
        let program = parse_ok(source);
        let f = only_function(&program);
        let types: Vec<_> = f
            .parameters
            .iter()
            .map(|p| match &p.node {
                Parameter::Named { ty, .. } => &ty.node,
                other => panic!("expected named parameter, got {:?}", other),
            })
            .collect();
        assert!(matches!(types[0], Type::Pointer(_)));
        assert!(matches!(types[1], Type::Slice(_)));
        assert!(matches!(types[2], Type::Array(_, _)));
    }

    #[test]
    fn signature_types() {
        let program = parse_ok("static callback: c fn(int, int) int\n");
        let Item::Static(s) = &program.items[0].node else {
            panic!("expected a static");
        };
        let Some(Spanned {
            node: Type::Signature(sig),
            ..
        }) = &s.ty
        else {
            panic!("expected a signature type, got {:?}", s.ty);
        };
        assert_eq!(sig.convention.as_deref(), Some("c"));
        assert_eq!(sig.parameters.len(), 2);
        assert!(sig.return_type.is_some());
    }

    #[test]
    fn errors_recover_at_item_boundaries() {
        let source = "fn good() = 1\nstatic bare\nfn also_good() = 2\n";
        let (program, errors) = parse_with_errors(source);
        assert_eq!(errors.len(), 1);
        assert_eq!(program.items.len(), 3);
        assert!(matches!(program.items[0].node, Item::Function(_)));
        assert!(matches!(program.items[1].node, Item::Error));
        assert!(matches!(program.items[2].node, Item::Function(_)));
    }

    #[test]
    fn errors_recover_at_statement_boundaries() {
        let source = "\
fn f():
    let a = 1
    let
    let b = 2
";
        let (program, errors) = parse_with_errors(source);
        assert_eq!(errors.len(), 1);
        let f = match &program.items[0].node {
            Item::Function(f) => f,
            other => panic!("expected a function, got {:?}", other),
        };
        assert_eq!(f.body.len(), 3);
        assert!(matches!(f.body[1].node, Statement::Error));
        assert!(matches!(f.body[2].node, Statement::Let { .. }));
    }

    #[test]
    fn deep_nesting_fails_structurally_instead_of_overflowing() {
        let mut source = String::from("fn f() int = ");
        for _ in 0..MAX_NESTING + 8 {
            source.push('(');
        }
        source.push('1');
        for _ in 0..MAX_NESTING + 8 {
            source.push(')');
        }
        source.push('\n');
        let (_, errors) = parse_with_errors(&source);
        assert!(!errors.is_empty());
        assert!(errors.iter().any(|e| e.message.contains("nesting")));
    }

    #[test]
    fn compound_target_breaks_operator_climbing() {
        // `x + 1` alone is an expression statement; `x += 1` must not parse
        // `x + 1` first and then choke on `=`.
        let program = parse_ok("fn f():\n    x + 1\n    x += 1\n");
        let f = only_function(&program);
        assert!(matches!(f.body[0].node, Statement::Expr(_)));
        assert!(matches!(f.body[1].node, Statement::Compound { .. }));
    }
}
