//! Option registry: definitions, current values and hooks.

use std::collections::HashMap;

use tracing::debug;

use super::{OptionFlags, OptionHandle, OptionType};
use crate::error::{BoxError, CmdError, Result};
use crate::value::{TypedValue, ValueKind};

/// Hook called after an option value changed.
pub type ChangeHook = Box<dyn FnMut(&mut OptionTable)>;

/// Hook called before an option is written to the preferences document.
pub type SaveHook = Box<dyn FnMut(&mut OptionTable) -> std::result::Result<(), BoxError>>;

/// Full definition of a registered option.
#[derive(Debug, Clone)]
pub struct OptionDef {
    /// Name used on the command line, without the leading dash.
    pub name: String,
    /// Empty for global options, otherwise the name of the owning command.
    pub group: String,
    /// Accepted format shown in usage, like `<number>` or `<ip>:<port>`.
    pub format: String,
    /// Help text.
    pub help: String,
    /// Current value.
    pub value: TypedValue,
    /// Text of the value at registration time. Never changes.
    pub default: String,
    /// Behaviour flags.
    pub flags: OptionFlags,
}

impl OptionDef {
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn is_preference(&self) -> bool {
        self.flags.contains(OptionFlags::PREFERENCE)
    }

    pub fn is_required(&self) -> bool {
        self.flags.contains(OptionFlags::REQUIRED)
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(OptionFlags::HIDDEN)
    }

    /// Returns true if the current text differs from the default text.
    ///
    /// Explicitly setting an option to its default text is indistinguishable
    /// from never setting it.
    pub fn differs_from_default(&self) -> bool {
        self.value.to_text() != self.default
    }
}

/// Registered options and their current values, in registration order.
#[derive(Debug, Default)]
pub struct OptionTable {
    defs: Vec<OptionDef>,
    index: HashMap<String, usize>,
}

impl OptionTable {
    /// Finds an option by name.
    pub fn lookup(&self, name: &str) -> Option<&OptionDef> {
        self.position(name).map(|i| &self.defs[i])
    }

    /// Returns the option at a registration index.
    pub fn at(&self, index: usize) -> Option<&OptionDef> {
        self.defs.get(index)
    }

    /// Returns the registration index of an option.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Iterates over all options in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Returns the definition behind a handle.
    pub fn def<T>(&self, handle: OptionHandle<T>) -> Option<&OptionDef> {
        self.at(handle.index())
    }

    /// Reads the current value behind a handle.
    ///
    /// Returns `None` if the handle belongs to a different registry.
    pub fn get<T: OptionType>(&self, handle: OptionHandle<T>) -> Option<T> {
        self.def(handle).and_then(|def| T::from_value(&def.value))
    }

    /// Overwrites the value behind a handle without firing hooks.
    pub fn set<T: OptionType>(&mut self, handle: OptionHandle<T>, value: T) {
        if let Some(def) = self.defs.get_mut(handle.index()) {
            if def.kind() == T::KIND {
                def.value = value.into_value();
            }
        }
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut OptionDef> {
        self.defs.get_mut(index)
    }

    fn insert(&mut self, def: OptionDef) -> Result<usize> {
        if self.index.contains_key(&def.name) {
            return Err(CmdError::DuplicateOption(def.name));
        }
        let position = self.defs.len();
        self.index.insert(def.name.clone(), position);
        self.defs.push(def);
        Ok(position)
    }
}

#[derive(Default)]
struct Hooks {
    on_change: Option<ChangeHook>,
    on_save: Option<SaveHook>,
}

/// Registry of all options known to a parser.
#[derive(Default)]
pub struct OptionRegistry {
    table: OptionTable,
    hooks: Vec<Hooks>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an option with an initial value.
    ///
    /// The text of `initial` becomes the default. Registering the same name
    /// twice fails.
    pub fn register(
        &mut self,
        name: &str,
        group: &str,
        format: &str,
        help: &str,
        initial: TypedValue,
        flags: OptionFlags,
    ) -> Result<usize> {
        let def = OptionDef {
            name: name.to_string(),
            group: group.to_string(),
            format: format.to_string(),
            help: help.to_string(),
            default: initial.to_text(),
            value: initial,
            flags,
        };
        debug!("Registering {} option -{}", def.kind().name(), name);
        let index = self.table.insert(def)?;
        self.hooks.push(Hooks::default());
        Ok(index)
    }

    /// Registers an option backed by `T` and returns a typed handle.
    pub fn add<T: OptionType>(
        &mut self,
        name: &str,
        group: &str,
        format: &str,
        help: &str,
        initial: T,
        flags: OptionFlags,
    ) -> Result<OptionHandle<T>> {
        self.register(name, group, format, help, initial.into_value(), flags)
            .map(OptionHandle::new)
    }

    /// Registers a boolean option.
    ///
    /// On the command line a bare `-name` means true.
    pub fn bool_option(
        &mut self,
        name: &str,
        group: &str,
        help: &str,
        initial: bool,
        flags: OptionFlags,
    ) -> Result<OptionHandle<bool>> {
        self.add(name, group, "", help, initial, flags)
    }

    /// Registers an integer option. Accepts `0x` hex and `0` octal prefixes.
    pub fn int_option(
        &mut self,
        name: &str,
        group: &str,
        format: &str,
        help: &str,
        initial: i64,
        flags: OptionFlags,
    ) -> Result<OptionHandle<i64>> {
        self.add(name, group, format, help, initial, flags)
    }

    /// Registers a float option.
    pub fn float_option(
        &mut self,
        name: &str,
        group: &str,
        format: &str,
        help: &str,
        initial: f64,
        flags: OptionFlags,
    ) -> Result<OptionHandle<f64>> {
        self.add(name, group, format, help, initial, flags)
    }

    /// Registers a string option.
    pub fn string_option(
        &mut self,
        name: &str,
        group: &str,
        format: &str,
        help: &str,
        initial: impl Into<String>,
        flags: OptionFlags,
    ) -> Result<OptionHandle<String>> {
        self.add(name, group, format, help, initial.into(), flags)
    }

    /// Registers a string list option.
    ///
    /// Each occurrence on the command line appends one string; an explicit
    /// empty value (`-name=`) clears the list.
    pub fn string_list_option(
        &mut self,
        name: &str,
        group: &str,
        format: &str,
        help: &str,
        initial: Vec<String>,
        flags: OptionFlags,
    ) -> Result<OptionHandle<Vec<String>>> {
        self.add(name, group, format, help, initial, flags)
    }

    /// Registers a byte option, written as standard base64.
    pub fn bytes_option(
        &mut self,
        name: &str,
        group: &str,
        format: &str,
        help: &str,
        initial: Vec<u8>,
        flags: OptionFlags,
    ) -> Result<OptionHandle<Vec<u8>>> {
        self.add(name, group, format, help, initial, flags)
    }

    /// Sets the hook called after the option's value changed.
    ///
    /// Replaces any earlier hook.
    pub fn on_change<T>(
        &mut self,
        handle: OptionHandle<T>,
        hook: impl FnMut(&mut OptionTable) + 'static,
    ) {
        if let Some(hooks) = self.hooks.get_mut(handle.index()) {
            hooks.on_change = Some(Box::new(hook));
        }
    }

    /// Sets the hook called before the option is saved.
    ///
    /// Returning an error aborts serialization. Replaces any earlier hook.
    pub fn on_save<T>(
        &mut self,
        handle: OptionHandle<T>,
        hook: impl FnMut(&mut OptionTable) -> std::result::Result<(), BoxError> + 'static,
    ) {
        if let Some(hooks) = self.hooks.get_mut(handle.index()) {
            hooks.on_save = Some(Box::new(hook));
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&OptionDef> {
        self.table.lookup(name)
    }

    pub fn get<T: OptionType>(&self, handle: OptionHandle<T>) -> Option<T> {
        self.table.get(handle)
    }

    pub fn set<T: OptionType>(&mut self, handle: OptionHandle<T>, value: T) {
        self.table.set(handle, value);
    }

    pub fn table(&self) -> &OptionTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut OptionTable {
        &mut self.table
    }

    /// Returns the first required option still holding its default.
    pub fn missing_required(&self) -> Option<&OptionDef> {
        self.table
            .iter()
            .find(|def| def.is_required() && !def.differs_from_default())
    }

    pub(crate) fn fire_change(&mut self, index: usize) {
        if let Some(hook) = self.hooks.get_mut(index).and_then(|h| h.on_change.as_mut()) {
            hook(&mut self.table);
        }
    }

    pub(crate) fn fire_save(&mut self, index: usize) -> std::result::Result<(), BoxError> {
        match self.hooks.get_mut(index).and_then(|h| h.on_save.as_mut()) {
            Some(hook) => hook(&mut self.table),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for OptionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionRegistry")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
