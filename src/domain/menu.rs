//! Receipt printer entry in `menu.xml`.

pub const RECEIPT_PRINTER_MARKER: &str = r#"<Printer Name="Receipt""#;

pub const PRINTERS_SECTION: &str = r#"<PRINTERS Text="PRINTERS">"#;

pub const RECEIPT_PRINTER_LINE: &str = r#"<Printer Name="Receipt" DriverName="Receipt" MEV="1" Full_Size="0" Label="0" RAW="0" Catch_All="0" Print_Tables="1" Print_Counter="1" Print_Pickup="1" Print_Delivery="1" list_Events="|Receipt,Reports|" list_Categories="" list_Items="" list_Options="" list_Choices="" IP="" Port="" Auto_Remove_Tickets="0" />"#;

/// Outcome of [`ensure_receipt_printer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuPatch {
    AlreadyPresent,
    Inserted(String),
    MissingPrintersSection,
}

/// Add the receipt printer as the first entry of the printers section.
pub fn ensure_receipt_printer(content: &str) -> MenuPatch {
    if content.contains(RECEIPT_PRINTER_MARKER) {
        return MenuPatch::AlreadyPresent;
    }

    if !content.contains(PRINTERS_SECTION) {
        return MenuPatch::MissingPrintersSection;
    }

    MenuPatch::Inserted(content.replacen(
        PRINTERS_SECTION,
        &format!("{}\n\t\t{}", PRINTERS_SECTION, RECEIPT_PRINTER_LINE),
        1,
    ))
}
