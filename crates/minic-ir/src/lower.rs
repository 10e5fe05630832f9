//! AST -> IR lowering.
//!
//! Structured control flow becomes labels and conditional jumps; every
//! binary expression lands in a fresh temporary. Expression lowering
//! returns the operand holding the result, so nested expressions compose
//! by plain recursion.

use minic_par::ast::{BinOp, Expr, Program, Stmt};

use crate::ir::{reindex, Instruction, IrCode, Opcode, Operand};

/// Lowers a parsed program into a flat, indexed instruction list.
pub fn generate(program: &Program) -> IrCode {
    let mut generator = Generator::default();
    generator.lower_program(program);

    let mut code = generator.code;
    reindex(&mut code);
    code
}

/// Lowering state: the growing instruction list plus fresh-name counters
/// for temporaries (`T1, T2, ...`) and labels (`L1, L2, ...`).
#[derive(Default)]
struct Generator {
    code: Vec<Instruction>,
    temp_counter: u32,
    label_counter: u32,
}

impl Generator {
    fn make_temp(&mut self) -> Operand {
        self.temp_counter += 1;
        Operand::Temporary(format!("T{}", self.temp_counter))
    }

    fn make_label(&mut self) -> Operand {
        self.label_counter += 1;
        Operand::Label(format!("L{}", self.label_counter))
    }

    fn emit(&mut self, op: Opcode, result: Operand, arg1: Operand, arg2: Operand) {
        self.code.push(Instruction::new(op, result, arg1, arg2));
    }

    fn lower_program(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.lower_stmt(stmt);
        }
    }

    fn lower_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            // Declarations have no runtime effect.
            Stmt::VarDecl { .. } => {}

            Stmt::Assign { name, value } => {
                let rhs = self.lower_expr(value);
                let target = Operand::Variable(name.clone());
                if rhs.is_literal() {
                    self.emit(Opcode::LoadImm, target, rhs, Operand::None);
                } else {
                    self.emit(Opcode::Assign, target, rhs, Operand::None);
                }
            }

            Stmt::Print(expr) => {
                let value = self.lower_expr(expr);
                self.emit(Opcode::Print, Operand::None, value, Operand::None);
            }

            Stmt::If {
                condition,
                then_body,
                else_body,
            } => {
                let label_else = self.make_label();
                let label_end = self.make_label();

                let cond = self.lower_expr(condition);
                self.emit(Opcode::JmpIfZero, Operand::None, cond, label_else.clone());

                self.lower_program(then_body);
                if else_body.is_some() {
                    self.emit(Opcode::Jmp, Operand::None, label_end.clone(), Operand::None);
                }

                self.emit(Opcode::Label, Operand::None, label_else, Operand::None);
                if let Some(body) = else_body {
                    self.lower_program(body);
                }

                // Both branches converge here even when there is no else.
                self.emit(Opcode::Label, Operand::None, label_end, Operand::None);
            }

            Stmt::While { condition, body } => {
                let label_start = self.make_label();
                let label_end = self.make_label();

                self.emit(Opcode::Label, Operand::None, label_start.clone(), Operand::None);
                let cond = self.lower_expr(condition);
                self.emit(Opcode::JmpIfZero, Operand::None, cond, label_end.clone());

                self.lower_program(body);
                self.emit(Opcode::Jmp, Operand::None, label_start, Operand::None);
                self.emit(Opcode::Label, Operand::None, label_end, Operand::None);
            }
        }
    }

    fn lower_expr(&mut self, expr: &Expr) -> Operand {
        match expr {
            Expr::IntLiteral(value) => Operand::Literal(*value),
            Expr::Identifier(name) => Operand::Variable(name.clone()),
            Expr::Binary { op, left, right } => {
                let lhs = self.lower_expr(left);
                let rhs = self.lower_expr(right);
                let result = self.make_temp();
                self.emit(binop_opcode(*op), result.clone(), lhs, rhs);
                result
            }
        }
    }
}

const fn binop_opcode(op: BinOp) -> Opcode {
    match op {
        BinOp::Add => Opcode::Add,
        BinOp::Sub => Opcode::Sub,
        BinOp::Mul => Opcode::Mul,
        BinOp::Div => Opcode::Div,
        BinOp::Eq => Opcode::CmpEq,
        BinOp::Ne => Opcode::CmpNe,
        BinOp::Lt => Opcode::CmpLt,
        BinOp::Gt => Opcode::CmpGt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::render_listing;
    use minic_lex::Lexer;
    use minic_par::Parser;
    use minic_util::Handler;

    fn lower_source(source: &str) -> IrCode {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        lexer.run();
        let mut parser = Parser::new(&mut lexer, &handler);
        let program = parser.parse().expect("source must parse");
        assert!(!handler.has_errors());
        generate(&program)
    }

    fn listing(source: &str) -> Vec<String> {
        render_listing(&lower_source(source))
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_empty_program_generates_no_ir() {
        assert!(lower_source("").is_empty());
        assert!(lower_source("int x;").is_empty());
    }

    #[test]
    fn test_literal_assignment_uses_load_imm() {
        let code = lower_source("int x; x = 5;");
        assert_eq!(code.len(), 1);
        assert_eq!(code[0].op, Opcode::LoadImm);
        assert_eq!(code[0].to_string(), "000: x = 5");
    }

    #[test]
    fn test_variable_assignment_uses_assign() {
        let code = lower_source("int x; int y; x = 1; y = x;");
        assert_eq!(code[1].op, Opcode::Assign);
        assert_eq!(code[1].to_string(), "001: y = x");
    }

    #[test]
    fn test_expression_lowering_with_precedence() {
        // 2 + 3 * 4 multiplies first, then adds, then stores.
        assert_eq!(
            listing("int x; x = 2 + 3 * 4;"),
            vec![
                "000: T1 = 3 MUL 4",
                "001: T2 = 2 ADD T1",
                "002: x = T2",
            ]
        );
    }

    #[test]
    fn test_generated_ir_shape_and_indices() {
        let code = lower_source("int i; i = 0; while (i < 3) { print i; i = i + 1; }");
        for (i, instruction) in code.iter().enumerate() {
            assert_eq!(instruction.index, i);
        }
    }

    #[test]
    fn test_print_lowering() {
        assert_eq!(
            listing("print 1 + 2;"),
            vec!["000: T1 = 1 ADD 2", "001: PRINT T1"]
        );
    }

    #[test]
    fn test_if_without_else_layout() {
        assert_eq!(
            listing("int a; a = 5; if (a < 10) { print 1; }"),
            vec![
                "000: a = 5",
                "001: T1 = a CMP_LT 10",
                "002: JMP_IF_ZERO T1, L1",
                "003: PRINT 1",
                "L1: LABEL",
                "L2: LABEL",
            ]
        );
    }

    #[test]
    fn test_if_with_else_layout() {
        assert_eq!(
            listing("int a; a = 5; if (a < 10) { print 1; } else { print 2; }"),
            vec![
                "000: a = 5",
                "001: T1 = a CMP_LT 10",
                "002: JMP_IF_ZERO T1, L1",
                "003: PRINT 1",
                "004: JMP L2",
                "L1: LABEL",
                "006: PRINT 2",
                "L2: LABEL",
            ]
        );
    }

    #[test]
    fn test_while_layout() {
        assert_eq!(
            listing("int i; i = 0; while (i < 3) { i = i + 1; }"),
            vec![
                "000: i = 0",
                "L1: LABEL",
                "002: T1 = i CMP_LT 3",
                "003: JMP_IF_ZERO T1, L2",
                "004: T2 = i ADD 1",
                "005: i = T2",
                "006: JMP L1",
                "L2: LABEL",
            ]
        );
    }

    #[test]
    fn test_every_jump_targets_exactly_one_label() {
        let source = "int i; i = 0;\n\
                      while (i < 3) {\n\
                        if (i == 1) { print i; } else { print 0; }\n\
                        i = i + 1;\n\
                      }";
        let code = lower_source(source);

        let labels: Vec<&str> = code
            .iter()
            .filter(|instr| instr.op == Opcode::Label)
            .filter_map(|instr| instr.arg1.name())
            .collect();

        for instruction in &code {
            let target = match instruction.op {
                Opcode::Jmp => instruction.arg1.name(),
                Opcode::JmpIfZero => instruction.arg2.name(),
                _ => continue,
            };
            let target = target.expect("jump must carry a label");
            assert_eq!(
                labels.iter().filter(|l| **l == target).count(),
                1,
                "target {} must match exactly one label",
                target
            );
        }
    }

    #[test]
    fn test_label_names_are_unique() {
        let code = lower_source(
            "int a; a = 1; if (a == 1) { print 1; } while (a > 9) { a = a - 1; }",
        );
        let mut names: Vec<&str> = code
            .iter()
            .filter(|instr| instr.op == Opcode::Label)
            .filter_map(|instr| instr.arg1.name())
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_nested_if_allocates_distinct_temporaries() {
        let code = lower_source("int n; n = 1; if (n == 1) { if (n < 2) { print 42; } }");
        let temps: Vec<&str> = code
            .iter()
            .filter(|instr| instr.op.is_comparison())
            .filter_map(|instr| instr.result.name())
            .collect();
        assert_eq!(temps, vec!["T1", "T2"]);
    }
}
