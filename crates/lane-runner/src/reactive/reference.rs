use super::variable::Variable;

/// Either a literal value owned by the holder or a handle to a shared
/// [`Variable`]. Consumers read and write through it without caring which.
#[derive(Debug, Clone)]
pub enum Reference<T> {
    Literal(T),
    Shared(Variable<T>),
}

impl<T: Clone + PartialEq> Reference<T> {
    pub fn get(&self) -> T {
        match self {
            Reference::Literal(value) => value.clone(),
            Reference::Shared(variable) => variable.get(),
        }
    }

    /// Writes the literal in place, or sets the shared variable (which
    /// notifies its subscribers if the value changed).
    pub fn set(&mut self, value: T) {
        match self {
            Reference::Literal(current) => *current = value,
            Reference::Shared(variable) => {
                variable.set(value);
            }
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Reference::Shared(_))
    }
}

impl<T> From<Variable<T>> for Reference<T> {
    fn from(variable: Variable<T>) -> Self {
        Reference::Shared(variable)
    }
}

impl From<f32> for Reference<f32> {
    fn from(value: f32) -> Self {
        Reference::Literal(value)
    }
}

impl From<i32> for Reference<i32> {
    fn from(value: i32) -> Self {
        Reference::Literal(value)
    }
}
