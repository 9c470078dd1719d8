fn main() -> anyhow::Result<()> {
    clinic_concierge_lib::run()
}
