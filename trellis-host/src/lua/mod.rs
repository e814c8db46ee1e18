//! Lua props tables to [`Props`].

use crate::events::{EventType, Handler, UiEvent, WeakHandler};
use crate::instance::{PropValue, Props};
use crate::style::{Style, StyleInput, shorthand_longhands};
use mlua::{Function, Result, Table, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Reads Lua props tables, keeping handler identity stable across reads.
///
/// While its [`Handler`] is alive (held by committed props or a listener
/// registry), the same Lua function maps to the same handler, so an
/// unchanged callback costs no listener churn on the next commit. The cache
/// holds weak references only; dropped handlers release their Lua function
/// and their entry is swept on the next read.
#[derive(Default)]
pub struct LuaPropsReader {
    handlers: RefCell<HashMap<usize, WeakHandler>>,
}

impl LuaPropsReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a props table. Array entries and `key`/`children` belong to
    /// the tree layer and are skipped. `className` wins over `class`.
    pub fn read(&self, table: &Table) -> Result<Props> {
        self.handlers.borrow_mut().retain(|_, weak| weak.is_alive());

        let mut props = Props::new();
        let mut class_alias: Option<String> = None;

        for pair in table.clone().pairs::<Value, Value>() {
            let (key, value) = pair?;
            let Value::String(key) = key else {
                continue;
            };
            let key = key.to_str()?.to_string();
            let event = EventType::from_prop_name(&key);

            match (key.as_str(), event, value) {
                ("key" | "children", _, _) => {}
                ("style", _, Value::Table(style)) => {
                    props.style = Some(Rc::new(style_from_table(&style)?));
                }
                ("className", _, Value::String(class)) => {
                    props.class_name = Some(class.to_str()?.to_string().into());
                }
                ("class", _, Value::String(class)) => {
                    class_alias = Some(class.to_str()?.to_string());
                }
                (_, Some(event), Value::Function(func)) => {
                    props.handlers.insert(event, self.handler(func));
                }
                (name, _, value) => {
                    if let Some(value) = prop_value(value)? {
                        props.attrs.insert(name.into(), value);
                    }
                }
            }
        }
        if props.class_name.is_none() {
            props.class_name = class_alias.map(Into::into);
        }
        Ok(props)
    }

    /// Live cached handlers
    pub fn cached_handlers(&self) -> usize {
        self.handlers
            .borrow()
            .values()
            .filter(|weak| weak.is_alive())
            .count()
    }

    /// Drop cached handlers; the next read creates fresh ones
    pub fn clear_cache(&self) {
        self.handlers.borrow_mut().clear();
    }

    fn handler(&self, func: Function) -> Handler {
        let id = func.to_pointer() as usize;
        let mut handlers = self.handlers.borrow_mut();
        if let Some(handler) = handlers.get(&id).and_then(WeakHandler::upgrade) {
            return handler;
        }
        let handler = lua_handler(func);
        handlers.insert(id, handler.downgrade());
        handler
    }
}

/// Wrap a Lua function as a handler called with `(event_name, value)`.
/// Lua errors happen outside any commit, so they are logged and dropped.
fn lua_handler(func: Function) -> Handler {
    Handler::new(move |event: &UiEvent| {
        let name = event.event_type().native_name();
        let result = match event {
            UiEvent::Change { value } => func.call::<()>((name, value.as_str())),
            UiEvent::Key { key, .. } => func.call::<()>((name, key.as_str())),
            UiEvent::Pointer { x, y, .. } => func.call::<()>((name, *x, *y)),
            UiEvent::Click | UiEvent::Focus | UiEvent::Blur => func.call::<()>(name),
        };
        if let Err(err) = result {
            tracing::error!(event = name, error = %err, "lua handler failed");
        }
    })
}

/// Build a [`Style`] from a Lua table. Shorthands come first so an explicit
/// longhand always overrides them; otherwise keys are in sorted order.
pub fn style_from_table(table: &Table) -> Result<Style> {
    let mut entries = Vec::new();
    for pair in table.clone().pairs::<String, Value>() {
        let (key, value) = pair?;
        let input = match value {
            Value::Nil => StyleInput::Undefined,
            Value::Integer(n) => StyleInput::Number(n as f64),
            Value::Number(n) => StyleInput::Number(n),
            Value::String(s) => StyleInput::Str(s.to_str()?.to_string().into()),
            Value::LightUserData(ud) if ud.0.is_null() => StyleInput::Null,
            other => {
                return Err(mlua::Error::RuntimeError(format!(
                    "style.{key}: expected number or string, got {}",
                    other.type_name()
                )));
            }
        };
        entries.push((key, input));
    }
    entries.sort_by(|a, b| {
        let rank = |key: &str| shorthand_longhands(key).is_none();
        (rank(&a.0), &a.0).cmp(&(rank(&b.0), &b.0))
    });
    Ok(entries.into_iter().collect())
}

fn prop_value(value: Value) -> Result<Option<PropValue>> {
    Ok(Some(match value {
        Value::Nil => return Ok(None),
        Value::Boolean(b) => PropValue::Bool(b),
        Value::Integer(n) => PropValue::Number(n as f64),
        Value::Number(n) => PropValue::Number(n),
        Value::String(s) => PropValue::Text(s.to_str()?.to_string().into()),
        other => PropValue::opaque(other),
    }))
}
