use uwu_ast::{
    Context, Def, EnumDeclaration, Expr, External, Hint, Ident, Kind, Param, Scheme, Subst, Type,
    VarGen, VariantDecl, CALLABLE,
};

use crate::infer::infer;
use crate::result::TypeError;

fn hint(name: &str) -> Hint {
    Hint { span: None, id: Ident::new(name), args: vec![] }
}

fn hint_of(name: &str, args: Vec<Hint>) -> Hint {
    Hint { span: None, id: Ident::new(name), args }
}

fn param(name: &str, h: Hint) -> Param {
    Param { id: Ident::new(name), hint: Some(h) }
}

fn external(src: &str) -> Box<Expr> {
    Box::new(Expr::External(External { span: None, verbatim: src.to_string() }))
}

/// A binary operator's name together with the operand and result hints it
/// is typed with. `generic` lists the type variables the operator is
/// quantified over (empty for every monomorphic operator).
struct OpSig {
    name: &'static str,
    lhs: Hint,
    rhs: Hint,
    result: Hint,
    generics: Vec<&'static str>,
}

fn binary_op_defs() -> Vec<OpSig> {
    let num_op = |name| OpSig {
        name,
        lhs: hint("Num"),
        rhs: hint("Num"),
        result: hint("Num"),
        generics: vec![],
    };
    let num_cmp = |name| OpSig {
        name,
        lhs: hint("Num"),
        rhs: hint("Num"),
        result: hint("Bool"),
        generics: vec![],
    };
    let float_op = |name| OpSig {
        name,
        lhs: hint("Float"),
        rhs: hint("Float"),
        result: hint("Float"),
        generics: vec![],
    };
    vec![
        num_op("+"),
        num_op("-"),
        num_op("*"),
        num_op("/"),
        num_op("%"),
        num_cmp("<"),
        num_cmp(">"),
        OpSig { name: "++", lhs: hint("Str"), rhs: hint("Str"), result: hint("Str"), generics: vec![] },
        OpSig {
            name: "|",
            lhs: hint_of("Array", vec![hint("T")]),
            rhs: hint_of("Array", vec![hint("T")]),
            result: hint_of("Array", vec![hint("T")]),
            generics: vec!["T"],
        },
        OpSig { name: "==", lhs: hint("T"), rhs: hint("T"), result: hint("Bool"), generics: vec!["T"] },
        OpSig { name: "!=", lhs: hint("T"), rhs: hint("T"), result: hint("Bool"), generics: vec!["T"] },
        float_op("+."),
        float_op("-."),
        float_op("*."),
        float_op("/."),
    ]
}

/// Builds the context every compilation unit starts from: the primitive type
/// constructors, the `Bool`/`Option` enums, the closed set of 15 binary
/// operators, and the identity function -- all typed by running synthetic
/// `EnumDeclaration`/`Def` AST nodes through the real inferencer rather than
/// constructing their `Scheme`s by hand, so the prelude is checked by the
/// same machinery as user code.
pub fn seed_context(gen: &VarGen) -> Result<Context, TypeError> {
    let mut ctx = Context::default();
    for name in ["Num", "Str", "Float", "Unit", "Regex"] {
        ctx.insert(name.to_string(), Scheme::mono(Type::simple_con(name)));
    }
    ctx.insert("Array".to_string(), Scheme::mono(Type::con("Array", Kind::fun(Kind::Star, Kind::Star), vec![])));
    ctx.insert(
        CALLABLE.to_string(),
        Scheme::mono(Type::con(CALLABLE, Kind::fun(Kind::Star, Kind::fun(Kind::Star, Kind::Star)), vec![])),
    );

    let s = Subst::default();

    let bool_decl = Expr::EnumDeclaration(EnumDeclaration {
        span: None,
        id: Ident::new("Bool"),
        generics: vec![],
        variants: vec![
            VariantDecl { id: Ident::new("True"), fields: vec![] },
            VariantDecl { id: Ident::new("False"), fields: vec![] },
        ],
    });
    let (s, _) = infer(gen, &s, &mut ctx, &bool_decl)?;

    let option_decl = Expr::EnumDeclaration(EnumDeclaration {
        span: None,
        id: Ident::new("Option"),
        generics: vec![Ident::new("T")],
        variants: vec![
            VariantDecl { id: Ident::new("Some"), fields: vec![hint("T")] },
            VariantDecl { id: Ident::new("None"), fields: vec![] },
        ],
    });
    let (mut s, _) = infer(gen, &s, &mut ctx, &option_decl)?;

    for op in binary_op_defs() {
        let def = Expr::Def(Def {
            span: None,
            id: Ident::new(op.name),
            params: vec![param("a", op.lhs), param("b", op.rhs)],
            body: external(&format!("a {} b", op.name)),
            hint: Some(op.result),
            generics: op.generics.into_iter().map(Ident::new).collect(),
        });
        let (s1, _) = infer(gen, &s, &mut ctx, &def)?;
        s = s1;
    }

    let id_def = Expr::Def(Def {
        span: None,
        id: Ident::new("id"),
        params: vec![param("a", hint("T"))],
        body: Box::new(Expr::Identifier(Ident::new("a"))),
        hint: Some(hint("T")),
        generics: vec![Ident::new("T")],
    });
    let (_s, _) = infer(gen, &s, &mut ctx, &id_def)?;

    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_context_installs_primitives_and_operators() {
        let gen = VarGen::new();
        let ctx = seed_context(&gen).expect("prelude must type-check");
        for name in ["Num", "Str", "Float", "Unit", "Bool", "Option", "Array", "Callable", "+", "==", "|", "id"] {
            assert!(ctx.contains_key(name), "missing prelude binding for `{name}`");
        }
        assert!(ctx.contains_key(&Ident::new("True").ctor_key()));
        assert!(ctx.contains_key(&Ident::new("Some").ctor_key()));
    }
}
