use uwu_ast::{Block, Case, Expr, Ident, Let, Pattern};

/// The scrutinee slot bound to the top-level value being matched.
pub const ROOT_SLOT: &str = "$";

/// A clause: a mapping from scrutinee slot name to the pattern it must
/// satisfy, plus the expression to evaluate if every slot matches.
///
/// Insertion order matters: the branching heuristic breaks ties by
/// iteration order over the first clause's patterns, so this is a plain
/// ordered association list rather than a hash map.
#[derive(Debug, Clone)]
pub struct Clause {
    pub patterns: Vec<(String, Pattern)>,
    pub body: Expr,
}

impl Clause {
    fn get(&self, slot: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|(s, _)| s == slot).map(|(_, p)| p)
    }
}

/// A compiled pattern match.
#[derive(Debug, Clone)]
pub enum Tree {
    /// No remaining clause can match; reachable only if the scrutinee's
    /// alternatives are not fully covered.
    MissingLeaf,
    /// A matching clause's body, to be evaluated directly.
    Leaf(Box<Expr>),
    /// Dispatch on the constructor found at slot `var`: `yes` assumes it was
    /// built by `pattern_name` (binding each field to the corresponding
    /// entry of `vars`), `no` assumes it was not.
    Node { var: String, pattern_name: Ident, vars: Vec<String>, yes: Box<Tree>, no: Box<Tree> },
}

/// Separates `MatchAs` bindings from `MatchVariant` constraints in a
/// clause's pattern map: every `MatchAs(name)` entry is removed and
/// replaced by a synthetic `let name = slot` prepended to the body.
fn subst_var_eqs(clause: Clause) -> Clause {
    let mut bindings = Vec::new();
    let mut patterns = Vec::new();
    for (slot, pattern) in clause.patterns {
        match pattern {
            Pattern::MatchAs(name) => bindings.push((name, slot)),
            Pattern::MatchVariant(..) => patterns.push((slot, pattern)),
        }
    }
    if bindings.is_empty() {
        return Clause { patterns, body: clause.body };
    }
    let mut exprs: Vec<Expr> = bindings
        .into_iter()
        .map(|(name, slot)| {
            Expr::Let(Let {
                span: None,
                id: name,
                init: Box::new(Expr::Identifier(Ident::new(slot))),
                hint: None,
            })
        })
        .collect();
    exprs.push(clause.body);
    Clause { patterns, body: Expr::Block(Block { exprs }) }
}

/// Wraps each `case .. of` arm as a clause on the root slot and compiles
/// the whole match to a decision tree.
pub fn gen_match(cases: &[Case]) -> Tree {
    let clauses = cases
        .iter()
        .map(|case| Clause {
            patterns: vec![(ROOT_SLOT.to_string(), case.pattern.clone())],
            body: (*case.body).clone(),
        })
        .collect();
    gen_match_rec(clauses)
}

pub fn gen_match_rec(clauses: Vec<Clause>) -> Tree {
    if clauses.is_empty() {
        return Tree::MissingLeaf;
    }
    let clauses: Vec<Clause> = clauses.into_iter().map(subst_var_eqs).collect();
    let first = &clauses[0];
    if first.patterns.is_empty() {
        return Tree::Leaf(Box::new(clauses.into_iter().next().unwrap().body));
    }

    let branch_var = branching_heuristic(&clauses);
    let branch_pattern = first.get(&branch_var).cloned().expect("branch_var is in first clause");
    let (branch_name, sub_arity) = match &branch_pattern {
        Pattern::MatchVariant(name, subs) => (name.clone(), subs.len()),
        Pattern::MatchAs(_) => unreachable!("subst_var_eqs removed all MatchAs entries"),
    };
    let vars: Vec<String> = (0..sub_arity).map(|i| format!("{branch_var}._{i}")).collect();

    let mut yes = Vec::new();
    let mut no = Vec::new();
    for clause in clauses {
        let found = clause.get(&branch_var).cloned();
        match found {
            None => {
                yes.push(clause.clone());
                no.push(clause);
            }
            Some(Pattern::MatchVariant(name, subs)) if name == branch_name => {
                let mut patterns: Vec<(String, Pattern)> =
                    clause.patterns.into_iter().filter(|(slot, _)| *slot != branch_var).collect();
                patterns.extend(vars.iter().cloned().zip(subs));
                yes.push(Clause { patterns, body: clause.body });
            }
            Some(Pattern::MatchVariant(_, _)) => no.push(clause),
            Some(Pattern::MatchAs(_)) => unreachable!("subst_var_eqs removed all MatchAs entries"),
        }
    }

    Tree::Node {
        var: branch_var,
        pattern_name: branch_name,
        vars,
        yes: Box::new(gen_match_rec(yes)),
        no: Box::new(gen_match_rec(no)),
    }
}

fn branching_heuristic(clauses: &[Clause]) -> String {
    let first = &clauses[0];
    let mut best: Option<(&str, usize)> = None;
    for (slot, _) in &first.patterns {
        let count = clauses.iter().filter(|c| c.get(slot).is_some()).count();
        let is_new_best = match best {
            Some((_, best_count)) => count > best_count,
            None => true,
        };
        if is_new_best {
            best = Some((slot, count));
        }
    }
    best.expect("clause has at least one pattern").0.to_string()
}
