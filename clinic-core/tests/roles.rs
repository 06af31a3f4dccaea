use clinic_core::{navigation_for, Capability, Role};

#[test]
fn user_type_strings_map_to_roles() {
    assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!(" Profissional ".parse::<Role>().unwrap(), Role::Professional);
    assert_eq!("RECEPCAO".parse::<Role>().unwrap(), Role::Reception);
    assert!("visitante".parse::<Role>().is_err());
}

#[test]
fn role_deserializes_from_backend_value() {
    let role: Role = serde_json::from_str("\"profissional\"").unwrap();
    assert_eq!(role, Role::Professional);
}

#[test]
fn reception_cannot_open_reports() {
    assert!(!Role::Reception.can(Capability::ViewReports));
    assert!(!Role::Reception.can(Capability::AskAssistant));
    assert!(Role::Reception.can(Capability::ManageAppointments));
}

#[test]
fn navigation_follows_capabilities() {
    let admin: Vec<&str> = navigation_for(Role::Admin).iter().map(|i| i.path).collect();
    assert!(admin.contains(&"/usuarios"));
    assert!(admin.contains(&"/relatorios"));

    let professional: Vec<&str> = navigation_for(Role::Professional)
        .iter()
        .map(|i| i.path)
        .collect();
    assert_eq!(
        professional,
        vec!["/", "/pacientes", "/planos", "/registros", "/relatorios"]
    );
}
