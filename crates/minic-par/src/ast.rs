//! AST node definitions and the indented tree renderer.
//!
//! Every subtree is exclusively owned by its parent; the root [`Program`]
//! is handed from the parser to the IR generator and dropped afterwards.

/// AST root - an ordered sequence of statements.
///
/// Blocks (`{ ... }`) reuse the same type, so an empty block is simply an
/// empty `Program`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// The declared type of a variable. `int` is the only type in Mini.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Int,
}

impl TypeTag {
    pub const fn symbol(self) -> &'static str {
        match self {
            TypeTag::Int => "int",
        }
    }
}

/// Statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `int x;`
    VarDecl { name: String, ty: TypeTag },

    /// `x = expr;`
    Assign { name: String, value: Expr },

    /// `print expr;`
    Print(Expr),

    /// `if (cond) { ... }` with an optional `else { ... }`
    If {
        condition: Expr,
        then_body: Program,
        else_body: Option<Program>,
    },

    /// `while (cond) { ... }`
    While { condition: Expr, body: Program },
}

/// Expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// 32-bit signed integer literal.
    IntLiteral(i32),

    /// Reference to a variable by name.
    Identifier(String),

    /// Binary arithmetic or relational operation.
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Binary operators. Relational operators appear only as the single
/// top-level operator of a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Gt,
}

impl BinOp {
    /// The operator's source spelling.
    pub const fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
        }
    }

    pub const fn is_relational(self) -> bool {
        matches!(self, BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Gt)
    }
}

const V_BRANCH: &str = "|   ";
const H_BRANCH: &str = "|-- ";
const L_BRANCH: &str = "`-- ";
const NO_BRANCH: &str = "    ";

/// Renders the program as an indented tree for human inspection.
pub fn render_ast(program: &Program) -> String {
    let mut out = String::new();
    render_program(program, "", &mut out);
    out
}

fn render_program(program: &Program, indent: &str, out: &mut String) {
    out.push_str(&format!(
        "PROGRAM_BLOCK ({} statements)\n",
        program.statements.len()
    ));

    let count = program.statements.len();
    for (i, stmt) in program.statements.iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { L_BRANCH } else { H_BRANCH };
        let inner = format!("{}{}", indent, if last { NO_BRANCH } else { V_BRANCH });

        out.push_str(indent);
        out.push_str(branch);
        render_stmt(stmt, &inner, out);
    }
}

fn render_stmt(stmt: &Stmt, indent: &str, out: &mut String) {
    match stmt {
        Stmt::VarDecl { name, ty } => {
            out.push_str(&format!("VAR_DECL ({} {})\n", ty.symbol(), name));
        }
        Stmt::Assign { name, value } => {
            out.push_str(&format!("ASSIGN_STMT (ID: {})\n", name));
            render_captioned_expr(value, indent, "Expression:", true, out);
        }
        Stmt::Print(expr) => {
            out.push_str("PRINT_STMT\n");
            render_captioned_expr(expr, indent, "Expression:", true, out);
        }
        Stmt::If {
            condition,
            then_body,
            else_body,
        } => {
            out.push_str("IF_STMT\n");
            render_captioned_expr(condition, indent, "Condition:", false, out);

            let has_else = else_body.is_some();
            let branch = if has_else { H_BRANCH } else { L_BRANCH };
            let inner = format!("{}{}", indent, if has_else { V_BRANCH } else { NO_BRANCH });
            out.push_str(&format!("{}{}THEN_BLOCK:\n", indent, branch));
            out.push_str(&format!("{}{}", inner, L_BRANCH));
            render_program(then_body, &format!("{}{}", inner, NO_BRANCH), out);

            if let Some(body) = else_body {
                out.push_str(&format!("{}{}ELSE_BLOCK:\n", indent, L_BRANCH));
                let inner = format!("{}{}", indent, NO_BRANCH);
                out.push_str(&format!("{}{}", inner, L_BRANCH));
                render_program(body, &format!("{}{}", inner, NO_BRANCH), out);
            }
        }
        Stmt::While { condition, body } => {
            out.push_str("WHILE_STMT\n");
            render_captioned_expr(condition, indent, "Condition:", false, out);

            out.push_str(&format!("{}{}BODY_BLOCK:\n", indent, L_BRANCH));
            let inner = format!("{}{}", indent, NO_BRANCH);
            out.push_str(&format!("{}{}", inner, L_BRANCH));
            render_program(body, &format!("{}{}", inner, NO_BRANCH), out);
        }
    }
}

/// Renders `caption` on its own branch with `expr` as its only child.
fn render_captioned_expr(expr: &Expr, indent: &str, caption: &str, last: bool, out: &mut String) {
    let branch = if last { L_BRANCH } else { H_BRANCH };
    let inner = format!("{}{}", indent, if last { NO_BRANCH } else { V_BRANCH });

    out.push_str(&format!("{}{}{}\n", indent, branch, caption));
    out.push_str(&format!("{}{}", inner, L_BRANCH));
    render_expr(expr, &format!("{}{}", inner, NO_BRANCH), out);
}

fn render_expr(expr: &Expr, indent: &str, out: &mut String) {
    match expr {
        Expr::IntLiteral(value) => {
            out.push_str(&format!("INT_LITERAL ({})\n", value));
        }
        Expr::Identifier(name) => {
            out.push_str(&format!("IDENTIFIER ({})\n", name));
        }
        Expr::Binary { op, left, right } => {
            out.push_str(&format!("BINARY_OP ({})\n", op.symbol()));

            out.push_str(&format!("{}{}Left:\n", indent, H_BRANCH));
            out.push_str(&format!("{}{}{}", indent, V_BRANCH, L_BRANCH));
            render_expr(left, &format!("{}{}{}", indent, V_BRANCH, NO_BRANCH), out);

            out.push_str(&format!("{}{}Right:\n", indent, L_BRANCH));
            out.push_str(&format!("{}{}{}", indent, NO_BRANCH, L_BRANCH));
            render_expr(right, &format!("{}{}{}", indent, NO_BRANCH, NO_BRANCH), out);
        }
    }
}
