use crate::view::{FieldRow, MemberRow};
use jbind_api::TypeDirectory;
use jbind_core::{ArgumentTypes, ClassInspector, ResolutionFlags};
use tabled::Table;
use tabled::settings::Style;

pub fn method<D: TypeDirectory>(
    inspector: &ClassInspector<D>,
    receiver: &str,
    name: &str,
    arguments: Option<&ArgumentTypes>,
    flags: ResolutionFlags,
) -> jbind_core::Result<()> {
    let found = match arguments {
        Some(arguments) => inspector.resolve_method(receiver, name, arguments, flags)?,
        None => inspector.find_method(receiver, name, None, flags)?,
    };
    match found {
        Some(method) => println!("{}", Table::new([MemberRow::from(&method)]).with(Style::psql())),
        None => println!("No matching method {receiver}.{name} was found."),
    }
    Ok(())
}

pub fn constructor<D: TypeDirectory>(
    inspector: &ClassInspector<D>,
    receiver: &str,
    arguments: &ArgumentTypes,
) -> jbind_core::Result<()> {
    match inspector.resolve_constructor(receiver, arguments)? {
        Some(constructor) => println!(
            "{}",
            Table::new([MemberRow::from(&constructor)]).with(Style::psql())
        ),
        None => println!("No matching constructor for {receiver} was found."),
    }
    Ok(())
}

pub fn field<D: TypeDirectory>(
    inspector: &ClassInspector<D>,
    receiver: &str,
    field: &str,
    static_only: bool,
) -> jbind_core::Result<()> {
    let found = inspector.find_field(receiver, field, static_only)?;
    println!("{}", Table::new([FieldRow::from(&found)]).with(Style::psql()));
    Ok(())
}
