use std::cell::RefCell;
use std::rc::Rc;

/// Registry of callbacks invoked synchronously on the main loop
pub struct Callbacks<T> {
    listeners: RefCell<Vec<Rc<dyn Fn(&T)>>>,
}

impl<T> Callbacks<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn register(&self, callback: impl Fn(&T) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(callback));
    }

    /// Invoke every registered callback. A callback may register further
    /// callbacks; those only see later notifications.
    pub fn notify(&self, value: &T) {
        let listeners: Vec<_> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self::new()
    }
}
