//! Rule-level preparation.
//!
//! A [`Rule`] names the expressions of one instrumentation rule together
//! with the bindings they may refer to. [`RuleSet::prepare`] runs every
//! expression through bind, type check and (optionally) bytecode emission.
//! A rule with any failing expression is disabled on its own; the rest of
//! the set is unaffected.

use log::{debug, warn};
use ruleprobe_compiler::{
    Binder, Bindings, BytecodeChunk, BytecodeEmitter, ConstantPool, ExecutionContext, Expr,
    ExprCodegen, Interpreter, TypeChecker,
};
use ruleprobe_core::{RuleError, Span, Type, TypeUniverse, Value};

/// How an expression is used by its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprRole {
    /// Evaluated for its value.
    Read,
    /// The target of an assignment.
    Assign,
}

/// Source of one expression in a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleExpression {
    pub text: String,
    pub span: Span,
    /// Type required by the enclosing context, or [`Type::Undefined`].
    pub expected: Type,
    pub role: ExprRole,
}

/// An instrumentation rule as far as field resolution is concerned.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub bindings: Bindings,
    pub expressions: Vec<RuleExpression>,
}

impl Rule {
    pub fn new(name: impl Into<String>, bindings: Bindings) -> Self {
        Self {
            name: name.into(),
            bindings,
            expressions: Vec::new(),
        }
    }

    /// Add an expression read for its value.
    pub fn read(mut self, text: impl Into<String>, span: Span, expected: Type) -> Self {
        self.expressions.push(RuleExpression {
            text: text.into(),
            span,
            expected,
            role: ExprRole::Read,
        });
        self
    }

    /// Add an assignment target.
    pub fn assign(mut self, text: impl Into<String>, span: Span, expected: Type) -> Self {
        self.expressions.push(RuleExpression {
            text: text.into(),
            span,
            expected,
            role: ExprRole::Assign,
        });
        self
    }
}

/// Options for [`RuleSet::prepare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepareOptions {
    /// Emit bytecode for every expression after type checking.
    pub compile: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self { compile: true }
    }
}

/// A resolved expression, with its bytecode when compiled.
///
/// A [`ExprRole::Read`] chunk pushes the value. A [`ExprRole::Assign`] chunk
/// expects the new value on top of the stack and leaves it there.
#[derive(Debug, Clone)]
pub struct PreparedExpression {
    pub expr: Expr,
    pub ty: Type,
    pub role: ExprRole,
    pub chunk: Option<BytecodeChunk>,
}

impl PreparedExpression {
    pub fn interpret(&self, ctx: &mut dyn ExecutionContext) -> Result<Value, RuleError> {
        Ok(Interpreter::new(ctx).interpret(&self.expr)?)
    }

    pub fn assign(&self, ctx: &mut dyn ExecutionContext, value: Value) -> Result<Value, RuleError> {
        Ok(Interpreter::new(ctx).interpret_assign(&self.expr, value)?)
    }
}

/// A rule whose expressions all resolved.
#[derive(Debug, Clone)]
pub struct PreparedRule {
    pub name: String,
    pub bindings: Bindings,
    pub expressions: Vec<PreparedExpression>,
}

impl PreparedRule {
    /// Interpret every read expression in order.
    pub fn evaluate(&self, ctx: &mut dyn ExecutionContext) -> Result<Vec<Value>, RuleError> {
        self.expressions
            .iter()
            .filter(|prepared| prepared.role == ExprRole::Read)
            .map(|prepared| prepared.interpret(ctx))
            .collect()
    }
}

/// A rule that failed preparation.
#[derive(Debug, Clone, PartialEq)]
pub struct DisabledRule {
    pub name: String,
    pub error: RuleError,
}

/// The result of preparing a rule set.
#[derive(Debug, Default)]
pub struct Preparation {
    pub ready: Vec<PreparedRule>,
    pub disabled: Vec<DisabledRule>,
    /// Field references shared by every emitted chunk.
    pub constants: ConstantPool,
}

impl Preparation {
    pub fn rule(&self, name: &str) -> Option<&PreparedRule> {
        self.ready.iter().find(|rule| rule.name == name)
    }

    pub fn disabled(&self, name: &str) -> Option<&RuleError> {
        self.disabled
            .iter()
            .find(|rule| rule.name == name)
            .map(|rule| &rule.error)
    }

    /// True if any rule failed with an internal consistency error.
    pub fn has_internal_errors(&self) -> bool {
        self.disabled.iter().any(|rule| rule.error.is_internal())
    }
}

/// An ordered set of rules prepared together.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve every rule against `universe`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn prepare(&self, universe: &dyn TypeUniverse, options: PrepareOptions) -> Preparation {
        let mut preparation = Preparation::default();
        for rule in &self.rules {
            match prepare_rule(rule, universe, options, &mut preparation.constants) {
                Ok(prepared) => {
                    debug!(
                        "rule {} ready with {} expressions",
                        rule.name,
                        prepared.expressions.len()
                    );
                    preparation.ready.push(prepared);
                }
                Err(error) => {
                    warn!("rule {} disabled: {error}", rule.name);
                    preparation.disabled.push(DisabledRule {
                        name: rule.name.clone(),
                        error,
                    });
                }
            }
        }
        preparation
    }
}

fn prepare_rule(
    rule: &Rule,
    universe: &dyn TypeUniverse,
    options: PrepareOptions,
    constants: &mut ConstantPool,
) -> Result<PreparedRule, RuleError> {
    let binder = Binder::new(&rule.bindings);
    let checker = TypeChecker::new(universe, &rule.bindings);

    let mut expressions = Vec::with_capacity(rule.expressions.len());
    for source in &rule.expressions {
        let mut expr = Expr::parse_path(&source.text, source.span)?;
        match source.role {
            ExprRole::Read => binder.bind(&mut expr)?,
            ExprRole::Assign => binder.bind_assign(&mut expr)?,
        }
        let ty = checker.check(&mut expr, &source.expected)?;

        let chunk = if options.compile {
            Some(compile(&expr, source.role, constants)?)
        } else {
            None
        };
        expressions.push(PreparedExpression {
            expr,
            ty,
            role: source.role,
            chunk,
        });
    }

    Ok(PreparedRule {
        name: rule.name.clone(),
        bindings: rule.bindings.clone(),
        expressions,
    })
}

fn compile(
    expr: &Expr,
    role: ExprRole,
    constants: &mut ConstantPool,
) -> Result<BytecodeChunk, RuleError> {
    let mut emitter = BytecodeEmitter::new(constants);
    let mut codegen = ExprCodegen::new(&mut emitter);
    match role {
        ExprRole::Read => codegen.compile(expr)?,
        ExprRole::Assign => codegen.compile_assign(expr)?,
    }
    Ok(emitter.finish())
}
