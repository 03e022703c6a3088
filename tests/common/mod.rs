#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a temporary manifest with the given extension
    pub fn create_temp_manifest(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("waypoint_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_manifest(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_manifest(content, "json")
    }
}

pub mod fixtures {
    use waypoint::{GroupOptions, RouteRegistry};

    /// A small application's routes, registered the way boot code would
    pub fn zoo_registry() -> RouteRegistry {
        let mut routes = RouteRegistry::new();
        routes.get("/", "Home", "index").unwrap();
        routes.get("/zoo/animals/new", "Animals", "create").unwrap();
        routes.get("/zoo/animals", "Animals", "index").unwrap();
        routes.post("/zoo/animals", "Animals", "store").unwrap();
        routes
            .get("/zoo/animals/:id", "Animals", "show")
            .unwrap()
            .name("animals.show");
        routes.put("/zoo/animals/:id", "Animals", "update").unwrap();
        routes.patch("/zoo/animals/:id", "Animals", "patch").unwrap();
        routes.delete("/zoo/animals/:id", "Animals", "destroy").unwrap();
        routes.options("/zoo/health", "Health", "options").unwrap();
        routes
            .group(GroupOptions::new().prefix("/keepers").filter("auth"), |r| {
                r.get("/:keeper/shifts/:day?", "Shifts", "index")?;
                Ok(())
            })
            .unwrap();
        routes.boot_names().unwrap();
        routes
    }
}
