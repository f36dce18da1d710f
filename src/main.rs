use anyhow::Context;
use roster_domain::{MemberId, RegistrationForm};
use roster_persistence::CsvRecordStore;
use roster_workflow::{MembershipService, RegistrationOutcome, RegistrationWorkflow, UpdateOutcome};
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Menú interactivo del club sobre el archivo de socios configurado.
///
/// Opciones soportadas:
/// 1) Alta de socio
/// 2) Cancelar membresía
/// 3) Check-in
/// 4) Ver socio
/// 5) Listar socios
/// 6) Salir
fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "club_cli=info,roster_workflow=info".into());
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let (store, config) = roster_persistence::new_from_env().context("configuración del roster inválida")?;
    let store = Arc::new(store);
    let mut registration =
        RegistrationWorkflow::from_store(store.clone(), config.starting_member_id, config.default_visit_count)
            .with_context(|| format!("no se pudo leer {}", config.data_file.display()))?;
    let members = MembershipService::new(store);

    loop {
        println!("\n== Club: menú de socios ==");
        println!("1) Alta de socio");
        println!("2) Cancelar membresía");
        println!("3) Check-in");
        println!("4) Ver socio");
        println!("5) Listar socios");
        println!("6) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        if io::stdin().read_line(&mut choice)? == 0 {
            break;
        }
        match choice.trim() {
            "1" => register(&mut registration)?,
            "2" => {
                let Some(id) = prompt_member_id()? else { continue };
                match members.cancel(&id) {
                    Ok(UpdateOutcome::Updated(id)) => println!("Membresía {} cancelada", id),
                    Ok(UpdateOutcome::AlreadyCancelled) => println!("La membresía ya estaba cancelada"),
                    Err(e) => eprintln!("Error cancelando: {}", e),
                }
            }
            "3" => {
                let Some(id) = prompt_member_id()? else { continue };
                match members.check_in(&id) {
                    Ok(UpdateOutcome::Updated(id)) => println!("Check-in registrado para {}", id),
                    Ok(UpdateOutcome::AlreadyCancelled) => println!("La membresía ya estaba cancelada"),
                    Err(e) => eprintln!("Error en check-in: {}", e),
                }
            }
            "4" => {
                let Some(id) = prompt_member_id()? else { continue };
                match members.find(&id) {
                    Ok(Some(member)) => println!("{}", serde_json::to_string_pretty(&member)?),
                    Ok(None) => println!("No existe el socio {}", id),
                    Err(e) => eprintln!("Error leyendo socio: {}", e),
                }
            }
            "5" => match members.list() {
                Ok(list) => {
                    println!("\nID       | NOMBRE                         | ESTADO     | VISITAS");
                    println!("-----------------------------------------------------------------");
                    for m in list {
                        let name = format!("{} {}", m.first_name, m.last_name);
                        println!("{} | {:<30} | {:<10} | {}", m.member_id, name, m.membership_status, m.visit_count);
                    }
                }
                Err(e) => eprintln!("Error listando socios: {}", e),
            },
            "6" => {
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
            }
        }
    }

    Ok(())
}

/// Pide los datos del formulario, los valida y delega el alta. Un móvil
/// duplicado sólo se informa; el menú sigue funcionando.
fn register(workflow: &mut RegistrationWorkflow<CsvRecordStore>) -> io::Result<()> {
    let form = RegistrationForm { first_name: prompt("Nombre: ")?,
                                  last_name: prompt("Apellido: ")?,
                                  date_of_birth: prompt("Fecha de nacimiento (AAAA-MM-DD): ")?,
                                  email: prompt("Email: ")?,
                                  mobile_number: prompt("Móvil: ")?,
                                  membership_level: prompt("Nivel de membresía: ")? };
    if let Err(reason) = form.validate() {
        println!("{}", reason);
        return Ok(());
    }
    match workflow.register(&form) {
        Ok(RegistrationOutcome::Registered(id)) => {
            println!("Registro completado. Bienvenido al club, su número de socio es {}", id)
        }
        Ok(RegistrationOutcome::ExistingCustomer) => println!("Cliente existente: el móvil ya está registrado"),
        Err(e) => eprintln!("Error registrando socio: {}", e),
    }
    Ok(())
}

fn prompt_member_id() -> io::Result<Option<MemberId>> {
    let raw = prompt("Número de socio (8 dígitos): ")?;
    match raw.parse::<MemberId>() {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            eprintln!("{}", e);
            Ok(None)
        }
    }
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}
