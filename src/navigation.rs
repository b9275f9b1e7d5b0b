use serde::{Serialize, Serializer};

/// Screens the front end can be sent to after a command completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/ControlAsistencias",
        }
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_path() {
        assert_eq!(serde_json::to_string(&Route::Dashboard).unwrap(), "\"/ControlAsistencias\"");
        assert_eq!(serde_json::to_string(&Route::Login).unwrap(), "\"/login\"");
    }
}
