use uwu_ast::{apply, instantiate, Context, EnumDeclaration, Kind, Scheme, Subst, Type, VarGen, VariantCall};

use crate::infer::hint::infer_hint;
use crate::infer::infer;
use crate::result::TypeError;
use crate::unify::unify_subst;

/// `name(args...)`: `name` denotes both the wrapping constructor function
/// (bound under `name`) and the naked constructor `TCon` (bound under
/// `"$" + name`, [`Ident::ctor_key`]). Arguments are inferred right-to-left,
/// matching `Call`, but still folded onto the naked constructor in source
/// (left-to-right) order to build the applied variant type.
pub fn infer_variant_call(
    gen: &VarGen,
    s: &Subst,
    ctx: &mut Context,
    call: &VariantCall,
) -> Result<(Subst, Type), TypeError> {
    let tc = instantiate(
        gen,
        ctx.get(&call.name.name)
            .ok_or_else(|| TypeError::unbound_identifier(call.name.name.clone(), call.span))?,
    );
    let ctor_key = call.name.ctor_key();
    let tcc = instantiate(
        gen,
        ctx.get(&ctor_key).ok_or_else(|| TypeError::unbound_identifier(ctor_key, call.span))?,
    );

    let n = call.args.len();
    let mut arg_tys: Vec<Type> = vec![Type::simple_con("Unit"); n];
    let mut cur_s = s.clone();
    for i in (0..n).rev() {
        let (si, ti) = infer(gen, &cur_s, ctx, &call.args[i])?;
        cur_s = si;
        arg_tys[i] = ti;
    }

    let tv = arg_tys.into_iter().fold(tcc, Type::ap);
    let result = gen.fresh_star();
    let s_final = unify_subst(&tc, &Type::fun(tv, result.clone()), &cur_s, call.span)?;
    Ok((s_final.clone(), apply(&s_final, &result)))
}

/// `enum id<generics>{ variant(fields), ... }`: installs a `TCon` of kind
/// `KFun(g_1, .. KFun(g_n, KStar))` for the enum itself, plus a naked `TCon`
/// and a `variant -> enum` wrapper binding for each of its variants.
/// Generalized against the outer `Γ`, exactly like a `Def` binding.
pub fn infer_enum_decl(
    gen: &VarGen,
    s: &Subst,
    ctx: &mut Context,
    decl: &EnumDeclaration,
) -> Result<(Subst, Type), TypeError> {
    let alts: Vec<String> = decl.variants.iter().map(|v| v.id.name.clone()).collect();
    let enum_kind = Kind::ctor_kind(&vec![Kind::Star; decl.generics.len()]);
    let enum_con = Type::con(decl.id.name.clone(), enum_kind, alts);

    let mut inner = ctx.clone();
    let mut generic_tys = Vec::with_capacity(decl.generics.len());
    for g in &decl.generics {
        let tv = gen.fresh_star();
        inner.insert(g.name.clone(), Scheme::mono(tv.clone()));
        generic_tys.push(tv);
    }
    let enum_applied = generic_tys.into_iter().fold(enum_con.clone(), Type::ap);

    let mut cur_s = s.clone();
    for variant in &decl.variants {
        let mut field_tys = Vec::with_capacity(variant.fields.len());
        for field in &variant.fields {
            let (s1, t1) = infer_hint(gen, &cur_s, &mut inner, field)?;
            cur_s = s1;
            field_tys.push(t1);
        }

        let variant_kind = Kind::ctor_kind(&vec![Kind::Star; field_tys.len()]);
        let naked_con = Type::con(variant.id.name.clone(), variant_kind, vec![]);
        let variant_applied = field_tys.into_iter().fold(naked_con.clone(), Type::ap);
        let wrapper_ty = Type::fun(variant_applied, enum_applied.clone());

        let naked_scheme = Scheme::from_subst(&cur_s, ctx, &naked_con);
        let wrapper_scheme = Scheme::from_subst(&cur_s, ctx, &wrapper_ty);
        ctx.insert(variant.id.ctor_key(), naked_scheme);
        ctx.insert(variant.id.name.clone(), wrapper_scheme);
    }

    let enum_scheme = Scheme::from_subst(&cur_s, ctx, &enum_con);
    ctx.insert(decl.id.name.clone(), enum_scheme);

    Ok((cur_s.clone(), apply(&cur_s, &enum_con)))
}
