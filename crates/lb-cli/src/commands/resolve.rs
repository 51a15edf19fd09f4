pub fn run(
    template: &str,
    pos: &str,
    player: Option<&str>,
    player_pos: Option<&str>,
    seed: u64,
) -> Result<(), String> {
    let mut ctx = super::build_context(pos, player, player_pos, seed)?;
    let resolved = lb_template::resolve(template, &mut ctx).map_err(|e| e.to_string())?;
    println!("{resolved}");
    Ok(())
}
