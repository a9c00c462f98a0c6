/// The address-bar abstraction: what the outside world currently shows. The
/// manager only ever writes it, apart from the self-navigation equality check
/// in `push`.
#[cfg_attr(test, mockall::automock)]
pub trait NavigatorAdapter {
    fn href(&self) -> String;
    fn name(&self) -> String;
    fn origin(&self) -> String;
    fn set_location(&mut self, href: &str, name: &str);
}

/// Default adapter for embedders without a real address bar.
pub struct InMemoryNavigator {
    href: String,
    name: String,
    origin: String,
}

impl InMemoryNavigator {
    pub fn new<O: Into<String>>(origin: O) -> Self {
        InMemoryNavigator {
            href: String::new(),
            name: String::new(),
            origin: origin.into(),
        }
    }
}

impl NavigatorAdapter for InMemoryNavigator {
    fn href(&self) -> String {
        self.href.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn set_location(&mut self, href: &str, name: &str) {
        self.href = href.to_string();
        self.name = name.to_string();
    }
}
