//! General evaluator
//!
//! Walks a token program against a value graph with a frame stack.
//! Each resolved step appends a frame of `(value, location)`; prefixes
//! rebase the context over that stack, and the recorded locations make
//! the final step addressable for writes.

use crate::tokenizer::{Modifiers, Program, Step, SubOp};
use crate::value::Value;

use super::wildcard;
use super::write::{apply_write, Location, Locator};

/// One stack position: the resolved value and, when the value was
/// reached by concrete keys and indices, its trail from the root
#[derive(Debug, Clone)]
struct Frame {
    value: Value,
    loc: Option<Location>,
}

impl Frame {
    fn root(value: &Value) -> Self {
        Self {
            value: value.clone(),
            loc: Some(Vec::new()),
        }
    }

    fn extend(&self, edge: Locator) -> Option<Location> {
        self.loc.as_ref().map(|trail| {
            let mut next = trail.clone();
            next.push(edge);
            next
        })
    }
}

/// Coerce a resolved value into a property name
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.clone()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Bare words that read as scalar literals in argument position
fn literal_scalar(word: &str) -> Option<Value> {
    match word {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        _ => {
            if let Ok(i) = word.parse::<i64>() {
                return Some(Value::Int(i));
            }
            if word.contains('.') {
                if let Ok(f) = word.parse::<f64>() {
                    return Some(Value::Float(f));
                }
            }
            None
        }
    }
}

struct Resolver<'a> {
    args: &'a [Value],
    /// Materialise missing map intermediates as empty maps; set only on
    /// the write spine under the engine's force option
    materialize: bool,
}

/// Read a program against a root
pub(crate) fn resolve_read(root: &Value, program: &Program, args: &[Value]) -> Option<Value> {
    let resolver = Resolver {
        args,
        materialize: false,
    };
    let mut frames = vec![Frame::root(root)];
    for step in program.steps() {
        let (value, loc) = resolver.eval_step(step, &mut frames)?;
        frames.push(Frame { value, loc });
    }
    frames.pop().map(|frame| frame.value)
}

/// Write a program's final step against a root
///
/// Targets are collected first, then applied in declaration order;
/// partial writes are retained and the return value reports whether
/// every target was assigned.
pub(crate) fn resolve_write(
    root: &mut Value,
    program: &Program,
    new_value: &Value,
    args: &[Value],
    force: bool,
) -> bool {
    let (last, init) = match program.steps().split_last() {
        Some(split) => split,
        None => return false,
    };
    let resolver = Resolver {
        args,
        materialize: force,
    };
    let mut frames = vec![Frame::root(root)];
    for step in init {
        match resolver.eval_step(step, &mut frames) {
            Some((value, loc)) => frames.push(Frame { value, loc }),
            None => return false,
        }
    }
    let targets = match resolver.step_targets(last, &mut frames) {
        Some(targets) if !targets.is_empty() => targets,
        _ => return false,
    };
    let mut all_assigned = true;
    for target in &targets {
        all_assigned &= apply_write(root, target, new_value, force);
    }
    all_assigned
}

impl<'a> Resolver<'a> {
    /// A nested resolver for sub-evaluations, which never materialise
    fn reader(&self) -> Resolver<'a> {
        Resolver {
            args: self.args,
            materialize: false,
        }
    }

    fn arg(&self, word: &str) -> Option<&'a Value> {
        let k = word.parse::<usize>().ok()?;
        if k == 0 {
            return None;
        }
        self.args.get(k - 1)
    }

    /// Resolve one word against a frame
    fn lookup(&self, frame: &Frame, word: &str) -> Option<(Value, Option<Location>)> {
        match &frame.value {
            Value::Map(entries) => match entries.get(word) {
                Some(value) => Some((value.clone(), frame.extend(Locator::Key(word.to_string())))),
                None if self.materialize => {
                    Some((Value::map(), frame.extend(Locator::Key(word.to_string()))))
                }
                None => None,
            },
            Value::Seq(items) => {
                let index = word.parse::<usize>().ok()?;
                items
                    .get(index)
                    .map(|value| (value.clone(), frame.extend(Locator::Index(index))))
            }
            // Indexing a callable yields the word itself, naming a
            // following invocation
            Value::Callable(_) => Some((Value::Str(word.to_string()), None)),
            _ => None,
        }
    }

    fn eval_step(&self, step: &Step, frames: &mut Vec<Frame>) -> Option<(Value, Option<Location>)> {
        match step {
            Step::Name(word) => self.lookup(frames.last()?, word),
            Step::Modified {
                word,
                mods,
                wildcard,
                do_each,
            } => self.eval_modified(word, *mods, *wildcard, *do_each, frames),
            Step::Collection { branches, do_each } => {
                self.eval_collection(branches, *do_each, frames.last()?)
            }
            Step::Sub {
                program,
                op,
                do_each,
            } => self.eval_sub(program, *op, *do_each, frames),
        }
    }

    fn eval_modified(
        &self,
        word: &str,
        mods: Modifiers,
        wildcard: bool,
        do_each: bool,
        frames: &mut Vec<Frame>,
    ) -> Option<(Value, Option<Location>)> {
        let mut ctx_index = frames.len().checked_sub(1)?;
        if mods.parents > 0 {
            ctx_index = ctx_index.checked_sub(mods.parents as usize)?;
        }
        if mods.root {
            frames.truncate(1);
            ctx_index = 0;
        }

        let mut word = word.to_string();
        if mods.placeholder {
            word = stringify(self.arg(&word)?)?;
        }
        if mods.context {
            return Some((self.arg(&word)?.clone(), None));
        }

        let frame = frames.get(ctx_index)?;
        if do_each {
            let items = frame.value.as_seq()?;
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let element = Frame {
                    value: item.clone(),
                    loc: frame.extend(Locator::Index(index)),
                };
                if wildcard {
                    // per-element fan-out: one sequence of matched
                    // values per element
                    let map = element.value.as_map()?;
                    out.push(Value::Seq(wildcard::collect_values(map, &word)));
                } else {
                    let (value, _) = self.lookup(&element, &word)?;
                    out.push(value);
                }
            }
            return Some((Value::Seq(out), None));
        }
        if wildcard {
            let map = frame.value.as_map()?;
            return Some((Value::Seq(wildcard::collect_values(map, &word)), None));
        }
        self.lookup(frame, &word)
    }

    /// Evaluate one branch step against a standalone context
    fn eval_branch(&self, step: &Step, base: &Frame) -> Option<(Value, Option<Location>)> {
        let mut frames = vec![base.clone()];
        self.reader().eval_step(step, &mut frames)
    }

    fn eval_collection(
        &self,
        branches: &[Step],
        do_each: bool,
        ctx: &Frame,
    ) -> Option<(Value, Option<Location>)> {
        if do_each {
            let items = ctx.value.as_seq()?;
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let element = Frame {
                    value: item.clone(),
                    loc: ctx.extend(Locator::Index(index)),
                };
                let mut row = Vec::with_capacity(branches.len());
                for branch in branches {
                    if let Some((value, _)) = self.eval_branch(branch, &element) {
                        row.push(value);
                    }
                }
                out.push(Value::Seq(row));
            }
            return Some((Value::Seq(out), None));
        }
        let mut out = Vec::with_capacity(branches.len());
        for branch in branches {
            // absent branches contribute nothing to a read
            if let Some((value, _)) = self.eval_branch(branch, ctx) {
                out.push(value);
            }
        }
        Some((Value::Seq(out), None))
    }

    /// Evaluate a nested program with the given frame as its root;
    /// locations stay absolute because the base frame carries its trail
    fn sub_resolve(&self, program: &Program, base: &Frame) -> Option<(Value, Option<Location>)> {
        let mut frames = vec![base.clone()];
        let reader = self.reader();
        for step in program.steps() {
            let (value, loc) = reader.eval_step(step, &mut frames)?;
            frames.push(Frame { value, loc });
        }
        frames.pop().map(|frame| (frame.value, frame.loc))
    }

    fn eval_sub(
        &self,
        program: &Program,
        op: SubOp,
        do_each: bool,
        frames: &mut Vec<Frame>,
    ) -> Option<(Value, Option<Location>)> {
        if op == SubOp::Call {
            return self.eval_call(program, do_each, frames);
        }
        let frame = frames.last()?;
        match op {
            SubOp::SingleQuote | SubOp::DoubleQuote => {
                let literal = quote_text(program);
                if do_each {
                    self.each_lookup(frame, literal)
                } else {
                    self.lookup(frame, literal)
                }
            }
            SubOp::Property => {
                if program.is_empty() {
                    // pass-through: the context itself, trail intact
                    return Some((frame.value.clone(), frame.loc.clone()));
                }
                if do_each {
                    let items = frame.value.as_seq()?;
                    let mut out = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        let element = Frame {
                            value: item.clone(),
                            loc: frame.extend(Locator::Index(index)),
                        };
                        let (value, _) = self.sub_resolve(program, &element)?;
                        out.push(value);
                    }
                    Some((Value::Seq(out), None))
                } else {
                    self.sub_resolve(program, frame)
                }
            }
            SubOp::EvalProperty => {
                if do_each {
                    let items = frame.value.as_seq()?;
                    let mut out = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        let element = Frame {
                            value: item.clone(),
                            loc: frame.extend(Locator::Index(index)),
                        };
                        let (key_value, _) = self.sub_resolve(program, &element)?;
                        let key = stringify(&key_value)?;
                        let (value, _) = self.lookup(&element, &key)?;
                        out.push(value);
                    }
                    Some((Value::Seq(out), None))
                } else {
                    let (key_value, _) = self.sub_resolve(program, frame)?;
                    let key = stringify(&key_value)?;
                    self.lookup(frame, &key)
                }
            }
            SubOp::Call => None,
        }
    }

    fn each_lookup(&self, frame: &Frame, word: &str) -> Option<(Value, Option<Location>)> {
        let items = frame.value.as_seq()?;
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let element = Frame {
                value: item.clone(),
                loc: frame.extend(Locator::Index(index)),
            };
            let (value, _) = self.lookup(&element, word)?;
            out.push(value);
        }
        Some((Value::Seq(out), None))
    }

    fn eval_call(
        &self,
        program: &Program,
        do_each: bool,
        frames: &[Frame],
    ) -> Option<(Value, Option<Location>)> {
        let top = frames.len().checked_sub(1)?;
        let receiver = if top >= 1 {
            frames[top - 1].clone()
        } else {
            Frame {
                value: Value::Null,
                loc: None,
            }
        };
        let ctx = &frames[top];

        if do_each {
            let items = ctx.value.as_seq()?;
            // element-wise owners when the previous frame is the
            // sequence the callables were gathered from
            let owners = receiver
                .value
                .as_seq()
                .filter(|owners| owners.len() == items.len())
                .cloned();
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let func = match item {
                    Value::Callable(func) => func,
                    _ => return None,
                };
                let owner = owners
                    .as_ref()
                    .map(|o| o[index].clone())
                    .unwrap_or_else(|| receiver.value.clone());
                let owner_frame = Frame {
                    value: owner.clone(),
                    loc: None,
                };
                let call_args = self.call_args(program, &owner_frame);
                out.push(func.invoke(&owner, &call_args));
            }
            return Some((Value::Seq(out), None));
        }

        let func = match &ctx.value {
            Value::Callable(func) => func.clone(),
            _ => return None,
        };
        let call_args = self.call_args(program, &receiver);
        Some((func.invoke(&receiver.value, &call_args), None))
    }

    /// Evaluate an argument sub-program: absent invokes with no
    /// arguments, a sequence spreads positionally, anything else is a
    /// single argument
    fn call_args(&self, program: &Program, receiver: &Frame) -> Vec<Value> {
        let resolved = match program.steps() {
            [] => None,
            [single] => self.arg_step_value(single, receiver),
            _ => self.sub_resolve(program, receiver).map(|(value, _)| value),
        };
        match resolved {
            None => Vec::new(),
            Some(Value::Seq(items)) => items,
            Some(value) => vec![value],
        }
    }

    /// Argument position widens bare words into literals: quote spans
    /// are strings, numeric words numbers, and true/false/null scalars;
    /// everything else resolves as a path against the receiver
    fn arg_step_value(&self, step: &Step, receiver: &Frame) -> Option<Value> {
        if let Some(literal) = step.quote_literal() {
            return Some(Value::Str(literal.to_string()));
        }
        match step {
            Step::Collection { branches, .. } => {
                let mut out = Vec::with_capacity(branches.len());
                for branch in branches {
                    out.push(self.arg_step_value(branch, receiver)?);
                }
                Some(Value::Seq(out))
            }
            Step::Name(word) => literal_scalar(word)
                .or_else(|| self.eval_branch(step, receiver).map(|(value, _)| value)),
            _ => self.eval_branch(step, receiver).map(|(value, _)| value),
        }
    }

    /// Collect concrete assignment targets for the final step
    fn step_targets(&self, step: &Step, frames: &mut Vec<Frame>) -> Option<Vec<Location>> {
        match step {
            Step::Name(word) => self.name_target(frames.last()?, word).map(|t| vec![t]),
            Step::Modified {
                word,
                mods,
                wildcard,
                do_each,
            } => self.modified_targets(word, *mods, *wildcard, *do_each, frames),
            Step::Collection { branches, do_each } => {
                let ctx = frames.last()?.clone();
                if *do_each {
                    let items = ctx.value.as_seq()?.clone();
                    let mut out = Vec::new();
                    for (index, item) in items.iter().enumerate() {
                        let element = Frame {
                            value: item.clone(),
                            loc: ctx.extend(Locator::Index(index)),
                        };
                        for branch in branches {
                            out.extend(self.branch_targets(branch, &element)?);
                        }
                    }
                    Some(out)
                } else {
                    let mut out = Vec::new();
                    for branch in branches {
                        out.extend(self.branch_targets(branch, &ctx)?);
                    }
                    Some(out)
                }
            }
            Step::Sub {
                program,
                op,
                do_each,
            } => {
                let ctx = frames.last()?.clone();
                self.sub_targets(program, *op, *do_each, &ctx)
            }
        }
    }

    fn modified_targets(
        &self,
        word: &str,
        mods: Modifiers,
        wildcard: bool,
        do_each: bool,
        frames: &mut Vec<Frame>,
    ) -> Option<Vec<Location>> {
        // raw argument substitution has nothing to assign through
        if mods.context {
            return None;
        }
        let mut ctx_index = frames.len().checked_sub(1)?;
        if mods.parents > 0 {
            ctx_index = ctx_index.checked_sub(mods.parents as usize)?;
        }
        if mods.root {
            frames.truncate(1);
            ctx_index = 0;
        }
        let mut word = word.to_string();
        if mods.placeholder {
            word = stringify(self.arg(&word)?)?;
        }
        let frame = frames.get(ctx_index)?;
        if do_each {
            let items = frame.value.as_seq()?;
            let mut out = Vec::new();
            for (index, item) in items.iter().enumerate() {
                let element = Frame {
                    value: item.clone(),
                    loc: frame.extend(Locator::Index(index)),
                };
                if wildcard {
                    // matched keys per element, not the literal word
                    let map = element.value.as_map()?;
                    for key in wildcard::matching_keys(map, &word) {
                        out.push(element.extend(Locator::Key(key))?);
                    }
                } else {
                    out.push(self.name_target(&element, &word)?);
                }
            }
            return Some(out);
        }
        if wildcard {
            let map = frame.value.as_map()?;
            return wildcard::matching_keys(map, &word)
                .into_iter()
                .map(|key| frame.extend(Locator::Key(key)))
                .collect();
        }
        self.name_target(frame, &word).map(|t| vec![t])
    }

    /// Targets for one collection branch, evaluated against its own base
    fn branch_targets(&self, step: &Step, base: &Frame) -> Option<Vec<Location>> {
        let mut frames = vec![base.clone()];
        self.step_targets(step, &mut frames)
    }

    fn sub_targets(
        &self,
        program: &Program,
        op: SubOp,
        do_each: bool,
        ctx: &Frame,
    ) -> Option<Vec<Location>> {
        match op {
            SubOp::SingleQuote | SubOp::DoubleQuote => {
                let literal = quote_text(program).to_string();
                if do_each {
                    let items = ctx.value.as_seq()?;
                    let mut out = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        let element = Frame {
                            value: item.clone(),
                            loc: ctx.extend(Locator::Index(index)),
                        };
                        out.push(self.name_target(&element, &literal)?);
                    }
                    Some(out)
                } else {
                    self.name_target(ctx, &literal).map(|t| vec![t])
                }
            }
            SubOp::Property => {
                if program.is_empty() {
                    // a pass-through leaves no key to assign
                    return None;
                }
                if do_each {
                    let items = ctx.value.as_seq()?;
                    let mut out = Vec::new();
                    for (index, item) in items.iter().enumerate() {
                        let element = Frame {
                            value: item.clone(),
                            loc: ctx.extend(Locator::Index(index)),
                        };
                        out.extend(self.program_targets(program, &element)?);
                    }
                    Some(out)
                } else {
                    self.program_targets(program, ctx)
                }
            }
            SubOp::EvalProperty => {
                if do_each {
                    let items = ctx.value.as_seq()?;
                    let mut out = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        let element = Frame {
                            value: item.clone(),
                            loc: ctx.extend(Locator::Index(index)),
                        };
                        let (key_value, _) = self.sub_resolve(program, &element)?;
                        let key = stringify(&key_value)?;
                        out.push(self.name_target(&element, &key)?);
                    }
                    Some(out)
                } else {
                    let (key_value, _) = self.sub_resolve(program, ctx)?;
                    let key = stringify(&key_value)?;
                    self.name_target(ctx, &key).map(|t| vec![t])
                }
            }
            // invocation results are not assignable
            SubOp::Call => None,
        }
    }

    /// Targets for a nested program rooted at a frame
    fn program_targets(&self, program: &Program, base: &Frame) -> Option<Vec<Location>> {
        let (last, init) = program.steps().split_last()?;
        let mut frames = vec![base.clone()];
        for step in init {
            let (value, loc) = self.eval_step(step, &mut frames)?;
            frames.push(Frame { value, loc });
        }
        self.step_targets(last, &mut frames)
    }

    /// The single target a word names on a frame; final map keys may be
    /// created by the assignment, so existence is not required here
    fn name_target(&self, frame: &Frame, word: &str) -> Option<Location> {
        match &frame.value {
            Value::Map(_) => frame.extend(Locator::Key(word.to_string())),
            Value::Seq(_) => {
                let index = word.parse::<usize>().ok()?;
                frame.extend(Locator::Index(index))
            }
            _ => None,
        }
    }
}

/// Verbatim span of a quote sub-program
fn quote_text(program: &Program) -> &str {
    match program.steps() {
        [Step::Name(text)] => text,
        _ => "",
    }
}
