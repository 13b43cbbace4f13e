mod tree;

pub use tree::{gen_match, gen_match_rec, Clause, Tree, ROOT_SLOT};

#[cfg(test)]
mod tests {
    use super::*;
    use uwu_ast::{Case, Expr, Ident, NumLit, Pattern};

    fn num(n: i64) -> Expr {
        Expr::Num(NumLit { span: None, value: n })
    }

    fn ctor(name: &str, args: Vec<Pattern>) -> Pattern {
        Pattern::MatchVariant(Ident::new(name), args)
    }

    fn as_pat(name: &str) -> Pattern {
        Pattern::MatchAs(Ident::new(name))
    }

    fn case(pattern: Pattern, body: Expr) -> Case {
        Case { pattern, body: Box::new(body) }
    }

    /// `case x of None -> 0 | Some(n) -> n end`. The tree tests `None`
    /// first, then `Some`; the trailing `no` is a structurally present
    /// `MissingLeaf` (the tree is built without knowledge of `Option`'s
    /// closed alternative set — reachability of that leaf is what the
    /// type-aware exhaustiveness check rules out, not this builder).
    #[test]
    fn two_constructor_match_produces_expected_tree_shape() {
        let cases = vec![
            case(ctor("None", vec![]), num(0)),
            case(ctor("Some", vec![as_pat("n")]), Expr::Identifier(Ident::new("n"))),
        ];
        let tree = gen_match(&cases);
        match tree {
            Tree::Node { var, pattern_name, vars, yes, no } => {
                assert_eq!(var, ROOT_SLOT);
                assert_eq!(pattern_name.name, "None");
                assert!(vars.is_empty());
                assert!(matches!(*yes, Tree::Leaf(_)));
                match *no {
                    Tree::Node { pattern_name: inner_name, no: inner_no, .. } => {
                        assert_eq!(inner_name.name, "Some");
                        assert!(matches!(*inner_no, Tree::MissingLeaf));
                    }
                    other => panic!("expected a branch node, got {other:?}"),
                }
            }
            other => panic!("expected a branch node, got {other:?}"),
        }
    }

    /// A non-exhaustive match (only `Some` covered) must surface a
    /// `MissingLeaf` on the path where the scrutinee is `None`.
    #[test]
    fn non_exhaustive_match_surfaces_missing_leaf() {
        let cases = vec![case(ctor("Some", vec![as_pat("n")]), Expr::Identifier(Ident::new("n")))];
        let tree = gen_match(&cases);
        assert!(contains_missing(&tree));
    }

    /// Nested pattern `Some(Some(n))` should branch on the root slot first,
    /// then recurse into slot `$._0` to peel the inner `Some`.
    #[test]
    fn nested_pattern_branches_on_inner_slot() {
        let cases = vec![
            case(ctor("Some", vec![ctor("Some", vec![as_pat("n")])]), Expr::Identifier(Ident::new("n"))),
            case(ctor("Some", vec![ctor("None", vec![])]), num(0)),
            case(ctor("None", vec![]), num(0)),
        ];
        let tree = gen_match(&cases);
        match tree {
            Tree::Node { var, yes, .. } => {
                assert_eq!(var, ROOT_SLOT);
                match *yes {
                    Tree::Node { var: inner_var, .. } => assert_eq!(inner_var, format!("{ROOT_SLOT}._0")),
                    other => panic!("expected nested branch, got {other:?}"),
                }
            }
            other => panic!("expected a branch node, got {other:?}"),
        }
    }

    /// A lone `MatchAs` clause is a catch-all: it compiles straight to a
    /// leaf with no branching at all.
    #[test]
    fn catch_all_pattern_compiles_to_bare_leaf() {
        let cases = vec![case(as_pat("x"), Expr::Identifier(Ident::new("x")))];
        let tree = gen_match(&cases);
        assert!(matches!(tree, Tree::Leaf(_)));
    }

    /// Compiling the same clauses twice must produce the same tree shape:
    /// the branching heuristic's tie-break is deterministic, not
    /// hash-iteration-order dependent.
    #[test]
    fn decision_tree_compilation_is_stable() {
        let cases = vec![
            case(ctor("Pair", vec![as_pat("a"), as_pat("b")]), Expr::Identifier(Ident::new("a"))),
        ];
        let first = format!("{:?}", gen_match(&cases));
        let second = format!("{:?}", gen_match(&cases));
        assert_eq!(first, second);
    }

    fn contains_missing(tree: &Tree) -> bool {
        match tree {
            Tree::MissingLeaf => true,
            Tree::Leaf(_) => false,
            Tree::Node { yes, no, .. } => contains_missing(yes) || contains_missing(no),
        }
    }
}
