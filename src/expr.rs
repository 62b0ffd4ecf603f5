use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trig {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sec,
    Csc,
    Cot,
}

impl Trig {
    pub fn from_word(word: &str) -> Option<Trig> {
        Some(match word {
            "sin" => Trig::Sin,
            "cos" => Trig::Cos,
            "tan" => Trig::Tan,
            "arcsin" => Trig::Asin,
            "arccos" => Trig::Acos,
            "arctan" => Trig::Atan,
            "sec" => Trig::Sec,
            "csc" => Trig::Csc,
            "cot" => Trig::Cot,
            _ => return None,
        })
    }

    /// The control word this function renders as, without the backslash.
    pub fn latex_name(self) -> &'static str {
        match self {
            Trig::Sin => "sin",
            Trig::Cos => "cos",
            Trig::Tan => "tan",
            Trig::Asin => "arcsin",
            Trig::Acos => "arccos",
            Trig::Atan => "arctan",
            Trig::Sec => "sec",
            Trig::Csc => "csc",
            Trig::Cot => "cot",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant {
        value: f64,
        name: Option<String>,
    },
    Variable(String),
    /// Addends, left to right, never empty.
    Sum(Vec<Expr>),
    /// Factors, left to right, never empty. Rendered by juxtaposition.
    Product(Vec<Expr>),
    /// `base^exponent`, or a radical with index `exponent` when `root`
    /// is set.
    Power {
        base: Box<Expr>,
        exponent: Box<Expr>,
        root: bool,
    },
    Fraction {
        numerator: Box<Expr>,
        denominator: Box<Expr>,
    },
    TrigFunc {
        func: Trig,
        arg: Box<Expr>,
    },
}

impl Expr {
    pub fn number(value: f64) -> Expr {
        Expr::Constant { value, name: None }
    }

    pub fn constant(value: f64, name: impl Into<String>) -> Expr {
        Expr::Constant {
            value,
            name: Some(name.into()),
        }
    }

    /// Whether this node folds to a constant. Only immediate operands are
    /// inspected: a nested composite is never a `Constant` variant, so it
    /// makes its parent non-constant even if it would itself fold.
    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Constant { .. } => true,
            Expr::Variable(_) => false,
            Expr::Sum(terms) | Expr::Product(terms) => {
                terms.iter().all(|term| matches!(term, Expr::Constant { .. }))
            }
            Expr::Power { base, exponent, .. } => {
                matches!(**base, Expr::Constant { .. })
                    && matches!(**exponent, Expr::Constant { .. })
            }
            Expr::Fraction {
                numerator,
                denominator,
            } => {
                matches!(**numerator, Expr::Constant { .. })
                    && matches!(**denominator, Expr::Constant { .. })
            }
            Expr::TrigFunc { arg, .. } => matches!(**arg, Expr::Constant { .. }),
        }
    }

    pub fn to_latex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant {
                name: Some(name), ..
            } => write!(f, "{name}"),
            Expr::Constant { value, name: None } => write!(f, "{value}"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Sum(addends) => {
                for (i, addend) in addends.iter().enumerate() {
                    if i > 0 {
                        write!(f, "+")?;
                    }
                    write!(f, "{addend}")?;
                }
                Ok(())
            }
            Expr::Product(factors) => {
                for factor in factors {
                    write!(f, "{factor}")?;
                }
                Ok(())
            }
            Expr::Power {
                base,
                exponent,
                root: true,
            } => {
                if let Expr::Constant { value, .. } = &**exponent
                    && *value == 2.0
                {
                    write!(f, r"\sqrt{{{base}}}")
                } else {
                    write!(f, r"\sqrt[{exponent}]{{{base}}}")
                }
            }
            Expr::Power {
                base,
                exponent,
                root: false,
            } => match &**base {
                Expr::TrigFunc { func, arg } => {
                    write!(f, r"\{}^{{{exponent}}}({arg})", func.latex_name())
                }
                Expr::Constant { .. } | Expr::Variable(_) => {
                    write!(f, "{base}^{{{exponent}}}")
                }
                _ => write!(f, "({base})^{{{exponent}}}"),
            },
            Expr::Fraction {
                numerator,
                denominator,
            } => write!(f, r"\frac{{{numerator}}}{{{denominator}}}"),
            Expr::TrigFunc { func, arg } => write!(f, r"\{}({arg})", func.latex_name()),
        }
    }
}
